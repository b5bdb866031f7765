//! CLI 境界: 引数の解析・補完スクリプト・一覧表示

mod args;
mod render;

pub use args::{parse_args, print_completion, Cli, ParseOutcome};
#[cfg(test)]
pub use args::parse_args_from;
pub use render::render_view;
