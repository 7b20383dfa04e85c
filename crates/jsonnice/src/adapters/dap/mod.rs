mod protocol;
mod server;

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::{AppError, AppResult};

/// Port the editor extension connects to.
pub const DAP_PORT: u16 = 54321;

pub fn dap_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DAP_PORT))
}

/// Serves debug-adapter connections on `addr` until the listener fails.
pub fn serve(addr: SocketAddr) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    rt.block_on(server::run(addr))
}
