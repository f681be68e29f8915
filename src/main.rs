use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tank_emissions_toolbox::{app, config};

/// 고정지붕 저장탱크 배출량 계산기 (AP-42 7장)
#[derive(Parser, Debug)]
#[command(name = "tank_emissions_toolbox", version)]
#[command(about = "AP-42 Chapter 7 fixed-roof tank emissions calculator")]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 시나리오의 모든 탱크/기간 배출량을 계산한다
    Calculate {
        /// 시나리오 TOML 파일
        scenario: PathBuf,
    },
    /// 혼합물 하나의 증기압과 증기 조성을 계산한다
    VaporPressure {
        scenario: PathBuf,
        #[arg(long)]
        mixture: String,
        /// 예: "60 degF"
        #[arg(long)]
        temperature: String,
    },
    /// 내장 물질 카탈로그를 출력한다
    Materials,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_or_default(&cli.config)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cfg.log_level))
        .init();

    match cli.command {
        Command::Calculate { scenario } => {
            app::run_calculate(&cfg, &scenario)?;
        }
        Command::VaporPressure {
            scenario,
            mixture,
            temperature,
        } => app::run_vapor_pressure(&cfg, &scenario, &mixture, &temperature)?,
        Command::Materials => app::run_materials()?,
    }
    Ok(())
}
