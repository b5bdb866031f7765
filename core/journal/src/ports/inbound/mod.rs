//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Cli;
use common::error::Error;

/// 解析済みの CLI 入力を受けて実行し、終了コードを返す
pub trait UseCaseRunner {
    fn run(&self, cli: Cli) -> Result<i32, Error>;
}
