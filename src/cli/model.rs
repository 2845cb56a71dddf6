//! Model loading and configuration commands

use clap::{ArgAction, Args, Subcommand};

use super::forms::submit;
use super::Session;
use crate::console::forms::{LlmConfigForm, ModelLoadForm};
use crate::console::SubmitOutcome;
use crate::domain::model::parse_stop_sequences;
use crate::domain::{HuggingFaceSettings, LlamaCppSettings, ModelSettings};

/// Arguments shared by `load` and `llm-config`
#[derive(Args, Clone, Debug)]
pub struct ModelArgs {
    #[command(subcommand)]
    pub loader: LoaderArgs,
}

#[derive(Subcommand, Clone, Debug)]
pub enum LoaderArgs {
    /// Hugging Face transformers model
    Hf(HfArgs),

    /// Local model through llama.cpp
    LlamaCpp(LlamaCppArgs),
}

/// Hugging Face generation settings; unset values use the backend defaults
#[derive(Args, Clone, Debug)]
pub struct HfArgs {
    #[arg(long, default_value = "")]
    pub model_name: String,

    #[arg(long)]
    pub max_new_tokens: Option<u32>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub top_p: Option<f32>,

    #[arg(long)]
    pub top_k: Option<u32>,

    #[arg(long)]
    pub trust_remote_code: bool,

    #[arg(long, action = ArgAction::Set)]
    pub do_sample: Option<bool>,

    #[arg(long)]
    pub quantization: bool,

    #[arg(long)]
    pub quantization_type: Option<String>,
}

/// llama.cpp runtime settings; unset values use the backend defaults
#[derive(Args, Clone, Debug)]
pub struct LlamaCppArgs {
    #[arg(long)]
    pub repo_id: Option<String>,

    #[arg(long)]
    pub filename: Option<String>,

    #[arg(long)]
    pub n_ctx: Option<u32>,

    #[arg(long)]
    pub n_threads: Option<u32>,

    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i64>,

    /// GPU layers to offload; -1 offloads all
    #[arg(long, allow_hyphen_values = true)]
    pub n_gpus: Option<i32>,

    #[arg(long, action = ArgAction::Set)]
    pub verbose: Option<bool>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub top_p: Option<f32>,

    #[arg(long)]
    pub echo: bool,

    /// Comma separated stop sequences
    #[arg(long, default_value = "")]
    pub stop: String,
}

impl From<HfArgs> for HuggingFaceSettings {
    fn from(args: HfArgs) -> Self {
        let defaults = HuggingFaceSettings::new(args.model_name);

        Self {
            max_new_tokens: args.max_new_tokens.unwrap_or(defaults.max_new_tokens),
            temperature: args.temperature.unwrap_or(defaults.temperature),
            top_p: args.top_p.unwrap_or(defaults.top_p),
            top_k: args.top_k.unwrap_or(defaults.top_k),
            trust_remote_code: args.trust_remote_code,
            do_sample: args.do_sample.unwrap_or(defaults.do_sample),
            quantization: args.quantization,
            quantization_type: args
                .quantization_type
                .unwrap_or(defaults.quantization_type.clone()),
            ..defaults
        }
    }
}

impl From<LlamaCppArgs> for LlamaCppSettings {
    fn from(args: LlamaCppArgs) -> Self {
        let defaults = LlamaCppSettings::default();

        Self {
            repo_id: args.repo_id.unwrap_or(defaults.repo_id),
            filename: args.filename.unwrap_or(defaults.filename),
            n_ctx: args.n_ctx.unwrap_or(defaults.n_ctx),
            n_threads: args.n_threads.unwrap_or(defaults.n_threads),
            seed: args.seed.unwrap_or(defaults.seed),
            n_gpus: args.n_gpus.unwrap_or(defaults.n_gpus),
            verbose: args.verbose.unwrap_or(defaults.verbose),
            max_tokens: args.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: args.temperature.unwrap_or(defaults.temperature),
            top_p: args.top_p.unwrap_or(defaults.top_p),
            echo: args.echo,
            stop: parse_stop_sequences(&args.stop),
        }
    }
}

impl From<ModelArgs> for ModelSettings {
    fn from(args: ModelArgs) -> Self {
        match args.loader {
            LoaderArgs::Hf(hf) => ModelSettings::HuggingFace(hf.into()),
            LoaderArgs::LlamaCpp(cpp) => ModelSettings::LlamaCpp(cpp.into()),
        }
    }
}

/// `load hf|llama-cpp`
pub async fn load(session: &Session, args: ModelArgs) -> SubmitOutcome {
    submit(session, &ModelLoadForm::new(args.into())).await
}

/// `llm-config hf|llama-cpp`
pub async fn save_config(session: &Session, args: ModelArgs) -> SubmitOutcome {
    submit(session, &LlmConfigForm::new(args.into())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn settings(argv: &[&str]) -> ModelSettings {
        match Cli::parse_from(argv).command {
            Command::Load(args) | Command::LlmConfig(args) => args.into(),
            _ => panic!("expected a model command"),
        }
    }

    #[test]
    fn test_hf_overrides_and_defaults() {
        let settings = settings(&[
            "rag-console",
            "load",
            "hf",
            "--model-name",
            "mistralai/Mistral-7B-Instruct-v0.2",
            "--temperature",
            "0.2",
            "--do-sample",
            "false",
        ]);

        let ModelSettings::HuggingFace(hf) = settings else {
            panic!("expected Hugging Face settings");
        };
        assert_eq!(hf.model_name, "mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(hf.temperature, 0.2);
        assert!(!hf.do_sample);
        assert_eq!(hf.max_new_tokens, 256);
        assert_eq!(hf.quantization_type, "4bit");
    }

    #[test]
    fn test_llama_cpp_negative_gpus_and_stop_list() {
        let settings = settings(&[
            "rag-console",
            "llm-config",
            "llama-cpp",
            "--n-gpus",
            "-1",
            "--stop",
            "Q:, \\n,",
        ]);

        let ModelSettings::LlamaCpp(cpp) = settings else {
            panic!("expected llama.cpp settings");
        };
        assert_eq!(cpp.n_gpus, -1);
        assert_eq!(cpp.stop, vec!["Q:".to_string(), "\\n".to_string()]);
        assert_eq!(cpp.repo_id, LlamaCppSettings::default().repo_id);
    }
}
