//! 应用层
//!
//! 组合编排器、结果历史与导出：校验输入 → 一次完整分析 → 写入历史 → 展示 / 导出。
//! 同一时刻只处理一个分析请求，上一次完成前不会接受新的提交。

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::cli::{AnalyzeArgs, Commands};
use crate::config::{Config, CHUNK_SIZE};
use crate::dashboard;
use crate::error::{AppResult, InputError};
use crate::models::{AnalysisResult, BatchSummary};
use crate::orchestrator::{BatchOrchestrator, ResultHistory};
use crate::services::export::write_export;
use crate::services::ingest::{direct_text, extract_texts};
use crate::services::{ExportFormat, FileFormat, LlmService};
use crate::utils::logging::{log_startup, log_texts_loaded, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: BatchOrchestrator,
    history: ResultHistory,
    json_output: bool,
}

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    summary: BatchSummary,
    results: &'a [AnalysisResult],
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, json_output: bool) -> Self {
        let llm_service = LlmService::new(&config);
        log_startup(llm_service.model_name(), CHUNK_SIZE);
        Self::with_orchestrator(config, BatchOrchestrator::new(llm_service), json_output)
    }

    /// 使用指定的编排器创建应用
    pub fn with_orchestrator(config: Config, orchestrator: BatchOrchestrator, json_output: bool) -> Self {
        Self {
            config,
            orchestrator,
            history: ResultHistory::new(),
            json_output,
        }
    }

    pub fn history(&self) -> &ResultHistory {
        &self.history
    }

    /// 整个历史的仪表盘，交互模式每次提交后都展示它
    pub fn dashboard(&self) -> String {
        dashboard::render(&self.history.to_vec())
    }

    /// 运行子命令
    pub async fn run(mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Analyze(args) => self.run_analyze(args).await,
            Commands::Interactive => self.run_interactive().await,
        }
    }

    async fn run_analyze(&mut self, args: AnalyzeArgs) -> Result<()> {
        let mut texts = Vec::new();
        for text in &args.texts {
            texts.push(direct_text(text)?);
        }
        if let Some(path) = &args.file {
            texts.extend(load_file(path).await?);
        }

        let results = self.submit(texts).await?;
        self.present(&results)?;

        let out_dir = self.out_dir(args.out_dir.as_deref());
        for format in args.export {
            self.export(format, &out_dir).await?;
        }
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        println!("Enter text to analyze, or :file PATH / :export json|csv|pdf / :stats / :quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("读取标准输入失败")? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let outcome = match line.split_once(' ').unwrap_or((line, "")) {
                (":quit", _) | (":q", _) => break,
                (":stats", _) => {
                    println!("{}", self.dashboard());
                    Ok(())
                }
                (":file", path) => self.interactive_file(Path::new(path.trim())).await,
                (":export", name) => match ExportFormat::parse(name) {
                    Some(format) => {
                        let dir = self.out_dir(None);
                        self.export(format, &dir).await.map(|_| ())
                    }
                    None => Err(anyhow::anyhow!("未知的导出格式: {}", name.trim())),
                },
                _ if line.starts_with(':') => Err(anyhow::anyhow!("未知命令: {}", line)),
                _ => self.interactive_text(line).await,
            };

            // 单次提交失败只报告，不结束会话
            if let Err(e) = outcome {
                error!("❌ {:#}", e);
            }
        }

        info!("👋 会话结束，共分析 {} 条", self.history.len());
        Ok(())
    }

    async fn interactive_text(&mut self, line: &str) -> Result<()> {
        let text = direct_text(line)?;
        self.submit(vec![text]).await?;
        self.present(&self.history.to_vec())
    }

    async fn interactive_file(&mut self, path: &Path) -> Result<()> {
        let texts = load_file(path).await?;
        self.submit(texts).await?;
        self.present(&self.history.to_vec())
    }

    /// 提交一次完整分析；成功后整批写入历史
    pub async fn submit(&mut self, texts: Vec<String>) -> AppResult<Vec<AnalysisResult>> {
        if texts.is_empty() {
            return Err(InputError::NoTexts.into());
        }

        let results = match self.orchestrator.analyze(&texts).await {
            Ok(results) => results,
            Err(e) => {
                error!("❌ 分析失败，本次提交的结果全部丢弃。请检查 API 密钥和网络");
                return Err(e);
            }
        };

        self.history.record(results.clone());
        print_final_stats(&BatchSummary::from_results(&results), self.history.len());
        Ok(results)
    }

    /// 导出当前历史
    pub async fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
        let path = write_export(dir, &self.history.to_vec(), format, &chrono::Local::now()).await?;
        println!("Exported {}", path.display());
        Ok(path)
    }

    fn present(&self, results: &[AnalysisResult]) -> Result<()> {
        if self.json_output {
            let out = JsonOut {
                ok: true,
                summary: BatchSummary::from_results(results),
                results,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{}", dashboard::render(results));
        }
        Ok(())
    }

    fn out_dir(&self, requested: Option<&Path>) -> PathBuf {
        requested
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.config.output_dir))
    }
}

/// 读取文件并提取文本
///
/// 先按扩展名判断格式，不支持的类型在读取前就报错。
pub async fn load_file(path: &Path) -> Result<Vec<String>> {
    let format = FileFormat::from_path(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("无法读取文件: {}", path.display()))?;

    let texts = extract_texts(&bytes, format)?;
    if texts.is_empty() {
        return Err(InputError::NoTexts.into());
    }

    log_texts_loaded(texts.len(), &path.display().to_string());
    Ok(texts)
}
