use anyhow::Result;
use clap::Parser;

use snaplink::cli::{Cli, Commands};
use snaplink::config::{get_config, init_config_from};
use snaplink::runtime::modes;
use snaplink::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(&cli.config);

    match cli.command() {
        Commands::Config => {
            modes::run_config();
            Ok(())
        }
        Commands::Token { user_id } => modes::run_token(&user_id),
        Commands::Serve => {
            let config = get_config();
            // 必须持有到进程结束，否则日志不会被刷新
            let _guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
    }
}
