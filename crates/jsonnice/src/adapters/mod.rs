pub mod dap;
pub mod repl;
