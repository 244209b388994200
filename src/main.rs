use anyhow::Result;
use jusnexus::utils::logging;
use jusnexus::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化应用
    let app = App::initialize(config).await?;

    // `jusnexus logout` 只清除保存的会话
    if std::env::args().nth(1).as_deref() == Some("logout") {
        return app.logout().await;
    }

    app.run().await?;

    Ok(())
}
