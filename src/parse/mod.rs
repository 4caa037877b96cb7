//! Text extraction from model responses and saved source files.

mod code_block;
mod function;

pub use code_block::extract_code_block;
pub use function::{extract_function_name, get_function_from_code};
