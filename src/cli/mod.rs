use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modelpull")]
#[command(version, about = "Download model snapshots from the Hugging Face Hub", long_about = None)]
pub struct Cli {
	/// The repository ID (e.g., "meta-llama/Llama-3.2-1B")
	pub repo_id: String,

	/// Directory to save the model [default: models/]
	#[arg(long, visible_alias = "save_path")]
	pub save_path: Option<PathBuf>,

	/// Number of download attempts before giving up [default: 3]
	#[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
	pub retries: Option<u32>,

	/// Seconds to wait between attempts [default: 10]
	#[arg(long, value_name = "SECS")]
	pub retry_delay: Option<u64>,

	/// Repository revision (branch, tag or commit)
	#[arg(long, default_value = "main")]
	pub revision: String,

	/// Environment variable holding the hub token [default: HF_TOKEN]
	#[arg(long, value_name = "VAR")]
	pub token_env: Option<String>,

	/// Environment file to load instead of ./.env
	#[arg(long, value_name = "PATH")]
	pub env_file: Option<PathBuf>,
}
