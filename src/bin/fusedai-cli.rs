//! FusedAI 门户 CLI 客户端
//!
//! 通过命令行完成登录、会话检查、验证码校验、项目编辑等操作，
//! 跳转和提示通过日志输出。

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fusedai_portal_rust::portal::animation::{
    particles::{DEFAULT_LINK_DISTANCE, DEFAULT_PARTICLE_COUNT, FRAME_INTERVAL},
    spawn_particle_loop, spawn_text_cycler, ParticleField, TextCycler,
};
use fusedai_portal_rust::portal::project::ProjectLoad;
use fusedai_portal_rust::portal::quote::QuoteForm;
use fusedai_portal_rust::{
    ClientConfig, Notification, NotificationKind, PortalClient, PortalListener, Project,
    ProjectStatus, Route, SignupForm, ViewScope,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// FusedAI 门户 CLI
#[derive(Parser, Debug)]
#[command(name = "fusedai-cli")]
#[command(about = "FusedAI 门户 CLI 客户端", long_about = None)]
struct Args {
    /// API 基础地址（默认读取 FUSEDAI_API_BASE_URL）
    #[arg(long)]
    api_base_url: Option<String>,

    /// 本地持久化存储（默认读取 FUSEDAI_STORAGE_DB_URL）
    #[arg(long)]
    db: Option<String>,

    /// 日志级别（默认: info,fusedai_portal_rust=debug）
    #[arg(long, default_value = "info,fusedai_portal_rust=debug")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 用已保存的 token 检查会话
    CheckSession,
    /// 邮箱密码登录
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// 注册新账号
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// 提交 Google OAuth 授权码
    Google {
        #[arg(long)]
        code: String,
    },
    /// 交互式验证码校验（输入 6 位数字，或输入 resend 重发）
    VerifyOtp,
    /// 列出客户和联系人
    References,
    /// 编辑项目：从 JSON 文件选中项目，按参数修改后保存
    UpdateProject {
        /// 项目 JSON 文件（列表页缓存的记录）
        #[arg(long)]
        from: std::path::PathBuf,
        #[arg(long)]
        title: Option<String>,
        /// active | completed | pending | on-hold
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// 从项目 JSON 文件预填报价单并打印
    Quote {
        #[arg(long)]
        from: Option<std::path::PathBuf>,
    },
    /// 切换明暗主题
    Theme,
    /// 登出，清除本地会话
    Logout,
    /// 运行装饰动画若干秒
    Animate {
        #[arg(long, default_value = "3")]
        seconds: u64,
    },
}

/// 初始化日志（同时输出到 stdout 和文件）
fn init_logger(log_level: &str) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("fusedai-cli.log")
        .context("无法创建日志文件 fusedai-cli.log")?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 文件不需要颜色
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();
    Ok(())
}

struct CliPortalListener;

#[async_trait::async_trait]
impl PortalListener for CliPortalListener {
    async fn on_navigate(&self, route: Route) {
        info!("[CLI/Route] 🧭 跳转: {}", route);
    }

    async fn on_hard_redirect(&self, route: Route) {
        warn!("[CLI/Route] 🔁 整页跳转: {}（请重新登录）", route);
    }

    async fn on_notification(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!("[CLI/Toast] ✅ {}", notification.message),
            NotificationKind::Error => error!("[CLI/Toast] ❌ {}", notification.message),
        }
    }
}

fn read_project(path: &std::path::Path) -> Result<Project> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("读取项目文件失败: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("项目 JSON 无法解析: {}", path.display()))
}

fn parse_status(raw: &str) -> Result<ProjectStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .with_context(|| format!("未知的项目状态: {}", raw))
}

async fn verify_otp_interactive(client: &PortalClient) -> Result<()> {
    let scope = ViewScope::new("verify-otp");
    let mut verifier = client.otp_verifier();
    verifier.start_countdown();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("[CLI/OTP] 请输入 6 位验证码，或输入 resend 重发（冷却 {} 秒）", verifier.cooldown().remaining());
    while let Some(line) = lines.next_line().await.context("读取输入失败")? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("resend") {
            if let Err(e) = verifier.resend(&scope).await {
                warn!("[CLI/OTP] 重发失败: {}", e);
            }
            continue;
        }
        verifier.cells_mut().clear();
        verifier.cells_mut().paste(line);
        if !verifier.can_submit() {
            warn!("[CLI/OTP] 需要 6 位数字");
            continue;
        }
        match verifier.verify(&scope).await {
            Ok(_) => {
                info!("[CLI/OTP] ✅ 邮箱已验证");
                return Ok(());
            }
            Err(e) if e.is_unauthorized() => return Err(e).context("会话已失效"),
            Err(e) => warn!("[CLI/OTP] 验证失败: {}", e),
        }
    }
    Ok(())
}

async fn animate(seconds: u64) {
    let field = ParticleField::random(DEFAULT_PARTICLE_COUNT, 800.0, 600.0, &mut rand::thread_rng());
    let frames = Arc::new(AtomicUsize::new(0));
    let counter = frames.clone();
    let particles = spawn_particle_loop(field, FRAME_INTERVAL, DEFAULT_LINK_DISTANCE, move |_, links| {
        let n = counter.fetch_add(1, Ordering::Relaxed);
        if n % 60 == 0 {
            info!("[CLI/Animate] 第 {} 帧，连线 {} 条", n, links.len());
        }
    });
    let headline = TextCycler::new(["Quotes in minutes", "Projects in one place", "Clients kept happy"])
        .map(|cycler| {
            spawn_text_cycler(cycler, Duration::from_secs(1), |text| {
                info!("[CLI/Animate] 📝 {}", text);
            })
        });

    tokio::time::sleep(Duration::from_secs(seconds)).await;
    particles.cancel();
    drop(headline);
    info!("[CLI/Animate] 共 {} 帧", frames.load(Ordering::Relaxed));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level)?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.api_base_url {
        config = config.with_api_base_url(url);
    }
    if let Some(db) = args.db {
        config = config.with_storage_db_url(db);
    }

    let client = PortalClient::connect(config, Arc::new(CliPortalListener))
        .await
        .context("初始化客户端失败")?;
    info!("[CLI] 🚀 FusedAI 门户 CLI，主题: {}", client.context().theme().await.as_str());

    match args.command {
        Command::CheckSession => {
            let outcome = client
                .session_resolver()
                .resolve(&ViewScope::new("login"))
                .await;
            info!("[CLI] 会话检查结果: {:?}", outcome);
        }
        Command::Login { email, password } => {
            client
                .credentials()
                .login(&ViewScope::new("login"), &email, &password)
                .await
                .context("登录失败")?;
        }
        Command::Signup {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
            };
            client
                .credentials()
                .signup(&ViewScope::new("signup"), &form)
                .await
                .context("注册失败")?;
        }
        Command::Google { code } => {
            client
                .credentials()
                .google_exchange(&ViewScope::new("oauth-callback"), &code)
                .await
                .context("Google 登录失败")?;
        }
        Command::VerifyOtp => verify_otp_interactive(&client).await?,
        Command::References => {
            let mut editor = client.project_editor();
            editor
                .load_reference_lists(&ViewScope::new("project-edit"))
                .await;
            match &editor.customers().error {
                Some(e) => error!("[CLI] 客户列表加载失败: {}", e),
                None => {
                    for c in &editor.customers().items {
                        info!("[CLI]   客户 {} | {} | {}", c.id, c.name, c.company_name);
                    }
                }
            }
            match &editor.contacts().error {
                Some(e) => error!("[CLI] 联系人列表加载失败: {}", e),
                None => {
                    for c in &editor.contacts().items {
                        info!("[CLI]   联系人 {} | {} | {}", c.id, c.name, c.email);
                    }
                }
            }
        }
        Command::UpdateProject {
            from,
            title,
            status,
            description,
            address,
        } => {
            let scope = ViewScope::new("project-edit");
            let editor = client.project_editor();
            let selected = read_project(&from)?;
            editor.select_project(&scope, &selected).await?;

            let ProjectLoad::Loaded(mut project) = editor.load_project(&selected.id).await? else {
                anyhow::bail!("项目 {} 没有可编辑的缓存记录", selected.id);
            };
            if let Some(title) = title {
                project.title = title;
            }
            if let Some(status) = status {
                project.status = parse_status(&status)?;
            }
            if let Some(description) = description {
                project.description = description;
            }
            if let Some(address) = address {
                project.address = address;
            }
            editor
                .save(&scope, &project)
                .await
                .context("保存项目失败")?;
        }
        Command::Quote { from } => {
            let editor = client.project_editor();
            if let Some(path) = from {
                editor.cache().store(&read_project(&path)?).await?;
            }
            let form = QuoteForm::from_cache(editor.cache()).await?;
            info!(
                "[CLI/Quote] 项目: {} | 客户: {} | 联系人: {} <{}> | 地址: {} | 有效期至 {}",
                form.project_title,
                form.customer.company_name,
                form.customer.contact_name,
                form.customer.email,
                form.customer.address,
                form.valid_until
            );
        }
        Command::Theme => {
            let theme = client.context().toggle_theme().await?;
            info!("[CLI] 🎨 当前主题: {}", theme.as_str());
        }
        Command::Logout => {
            client.context().clear_session().await?;
            info!("[CLI] 👋 已登出");
        }
        Command::Animate { seconds } => animate(seconds).await,
    }

    Ok(())
}
