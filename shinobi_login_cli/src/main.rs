//! Shinobi 登录 CLI 工具

use clap::{Parser, Subcommand};
use shinobi_login_core::{validate, ClientConfig, Credentials, ShinobiClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shinobi-login")]
#[command(about = "Shinobi 登录客户端工具", long_about = None)]
struct Cli {
    /// 服务器地址（host 或 host:port，不含 scheme）
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    /// 使用 https
    #[arg(long)]
    tls: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 用户登录
    Login {
        /// 邮箱
        #[arg(short, long)]
        email: String,
        /// 密码
        #[arg(short, long)]
        password: String,
        /// 以 JSON 输出完整用户信息
        #[arg(long)]
        json: bool,
    },
    /// 仅校验表单，不发送请求
    Validate {
        /// 邮箱
        #[arg(short, long)]
        email: String,
        /// 密码
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        server: cli.server.clone(),
        use_tls: cli.tls,
        timeout: 30,
    };

    match cli.command {
        Commands::Login {
            email,
            password,
            json,
        } => {
            do_login(&config, &email, &password, json).await?;
        }
        Commands::Validate { email, password } => {
            do_validate(&config, &email, &password)?;
        }
    }

    Ok(())
}

async fn do_login(
    config: &ClientConfig,
    email: &str,
    password: &str,
    json: bool,
) -> anyhow::Result<()> {
    let credentials = Credentials {
        server: config.server.clone(),
        use_tls: config.use_tls,
        email: email.to_string(),
        password: password.to_string(),
    };
    credentials.validate()?;

    println!("正在登录: {}", config.base_url());

    let client = ShinobiClient::new(config.clone())?;
    let user = client.login(email, password).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("登录成功!");
        println!("用户ID: {}", user.uid);
        println!("Token: {}", user.auth_token);
    }

    Ok(())
}

fn do_validate(config: &ClientConfig, email: &str, password: &str) -> anyhow::Result<()> {
    // 与登录相同的顺序：服务器 → 邮箱 → 密码，报告首个无效字段
    if !validate::server_is_valid(&config.server) {
        anyhow::bail!("服务器地址无效");
    }
    if !validate::email_is_valid(email) {
        anyhow::bail!("邮箱无效");
    }
    if !validate::password_is_valid(password) {
        anyhow::bail!("密码无效");
    }

    println!("表单有效");
    Ok(())
}
