use crate::cli::Cli;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TOKEN_ENV: &str = "HF_TOKEN";
pub const DEFAULT_SAVE_PATH: &str = "models/";
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub save_path: PathBuf,
	pub retries: u32,
	pub retry_delay: Duration,
	pub token_env: String,
	/// Overrides the hub library's own cache location when set.
	pub cache_dir: Option<PathBuf>,
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	save_path: Option<PathBuf>,
	retries: Option<u32>,
	retry_delay_secs: Option<u64>,
	token_env: Option<String>,
	cache_dir: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			save_path: PathBuf::from(DEFAULT_SAVE_PATH),
			retries: DEFAULT_RETRIES,
			retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
			token_env: DEFAULT_TOKEN_ENV.to_string(),
			cache_dir: None,
		}
	}
}

impl Config {
	/// Defaults, then the config file, then `MODELPULL_*` variables.
	pub fn from_env() -> Result<Self> {
		let mut config = Self::default();

		if let Some(path) = Self::config_file_path() {
			if path.exists() {
				tracing::debug!("Loading config from {:?}", path);
				config.merge_file(&path)?;
			}
		}

		config.apply_env(|key| std::env::var(key).ok())?;
		Ok(config)
	}

	fn config_file_path() -> Option<PathBuf> {
		if let Ok(path) = std::env::var("MODELPULL_CONFIG") {
			return Some(PathBuf::from(path));
		}

		ProjectDirs::from("", "", "modelpull").map(|dirs| dirs.config_dir().join("config.toml"))
	}

	fn merge_file(&mut self, path: &Path) -> Result<()> {
		let content = std::fs::read_to_string(path)?;
		let file: ConfigFile = toml::from_str(&content)?;

		if let Some(save_path) = file.save_path {
			self.save_path = save_path;
		}
		if let Some(retries) = file.retries {
			self.retries = retries;
		}
		if let Some(secs) = file.retry_delay_secs {
			self.retry_delay = Duration::from_secs(secs);
		}
		if let Some(token_env) = file.token_env {
			self.token_env = token_env;
		}
		if file.cache_dir.is_some() {
			self.cache_dir = file.cache_dir;
		}

		Ok(())
	}

	fn apply_env<F>(&mut self, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(save_path) = lookup("MODELPULL_SAVE_PATH") {
			self.save_path = PathBuf::from(save_path);
		}
		if let Some(retries) = lookup("MODELPULL_RETRIES") {
			self.retries = retries.trim().parse().map_err(|_| {
				Error::ConfigError(format!("MODELPULL_RETRIES is not a number: {}", retries))
			})?;
		}
		if let Some(delay) = lookup("MODELPULL_RETRY_DELAY") {
			let secs: u64 = delay.trim().parse().map_err(|_| {
				Error::ConfigError(format!("MODELPULL_RETRY_DELAY is not a number: {}", delay))
			})?;
			self.retry_delay = Duration::from_secs(secs);
		}
		if let Some(token_env) = lookup("MODELPULL_TOKEN_ENV") {
			self.token_env = token_env;
		}
		if let Some(cache_dir) = lookup("MODELPULL_CACHE_DIR") {
			self.cache_dir = Some(PathBuf::from(cache_dir));
		}

		Ok(())
	}

	/// Flags given on the command line win over every other layer.
	pub fn apply_cli(&mut self, cli: &Cli) {
		if let Some(save_path) = &cli.save_path {
			self.save_path = save_path.clone();
		}
		if let Some(retries) = cli.retries {
			self.retries = retries;
		}
		if let Some(secs) = cli.retry_delay {
			self.retry_delay = Duration::from_secs(secs);
		}
		if let Some(token_env) = &cli.token_env {
			self.token_env = token_env.clone();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::Parser;
	use serial_test::serial;
	use std::collections::HashMap;
	use std::io::Write;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[test]
	fn defaults_match_cli_defaults() {
		let config = Config::default();
		assert_eq!(config.save_path, PathBuf::from("models/"));
		assert_eq!(config.retries, 3);
		assert_eq!(config.retry_delay, Duration::from_secs(10));
		assert_eq!(config.token_env, "HF_TOKEN");
		assert!(config.cache_dir.is_none());
	}

	#[test]
	fn env_overrides_defaults() {
		let mut config = Config::default();
		config
			.apply_env(lookup_from(&[
				("MODELPULL_SAVE_PATH", "/data/models"),
				("MODELPULL_RETRIES", "5"),
				("MODELPULL_RETRY_DELAY", " 2 "),
				("MODELPULL_TOKEN_ENV", "HUGGING_FACE_HUB_TOKEN"),
			]))
			.unwrap();

		assert_eq!(config.save_path, PathBuf::from("/data/models"));
		assert_eq!(config.retries, 5);
		assert_eq!(config.retry_delay, Duration::from_secs(2));
		assert_eq!(config.token_env, "HUGGING_FACE_HUB_TOKEN");
	}

	#[test]
	fn bad_retry_count_is_config_error() {
		let mut config = Config::default();
		let err = config
			.apply_env(lookup_from(&[("MODELPULL_RETRIES", "three")]))
			.unwrap_err();
		assert!(matches!(err, Error::ConfigError(_)));
	}

	#[test]
	fn file_values_are_merged() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "retries = 7\nretry_delay_secs = 1\ncache_dir = \"/tmp/hub\"").unwrap();

		let mut config = Config::default();
		config.merge_file(file.path()).unwrap();

		assert_eq!(config.retries, 7);
		assert_eq!(config.retry_delay, Duration::from_secs(1));
		assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/hub")));
		assert_eq!(config.save_path, PathBuf::from("models/"));
	}

	#[test]
	fn unknown_file_keys_are_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "retry = 7").unwrap();

		let err = Config::default().merge_file(file.path()).unwrap_err();
		assert!(matches!(err, Error::SerializationError(_)));
	}

	#[test]
	#[serial]
	fn from_env_reads_config_file_from_override_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "save_path = \"weights\"").unwrap();

		std::env::set_var("MODELPULL_CONFIG", file.path());
		let config = Config::from_env();
		std::env::remove_var("MODELPULL_CONFIG");

		assert_eq!(config.unwrap().save_path, PathBuf::from("weights"));
	}

	#[test]
	fn cli_beats_env_and_env_beats_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"save_path = \"from-file\"\nretries = 9\nretry_delay_secs = 4\ntoken_env = \"FILE_TOKEN\""
		)
		.unwrap();

		let mut config = Config::default();
		config.merge_file(file.path()).unwrap();
		config
			.apply_env(lookup_from(&[
				("MODELPULL_SAVE_PATH", "from-env"),
				("MODELPULL_RETRIES", "6"),
			]))
			.unwrap();
		let cli = Cli::try_parse_from(["modelpull", "owner/name", "--save-path", "from-cli"]).unwrap();
		config.apply_cli(&cli);

		assert_eq!(config.save_path, PathBuf::from("from-cli"));
		assert_eq!(config.retries, 6);
		assert_eq!(config.retry_delay, Duration::from_secs(4));
		assert_eq!(config.token_env, "FILE_TOKEN");
	}

	#[test]
	fn every_cli_flag_overrides() {
		let cli = Cli::try_parse_from([
			"modelpull",
			"owner/name",
			"--retries",
			"2",
			"--retry-delay",
			"0",
			"--token-env",
			"MY_TOKEN",
		])
		.unwrap();

		let mut config = Config::default();
		config.apply_cli(&cli);

		assert_eq!(config.save_path, PathBuf::from("models/"));
		assert_eq!(config.retries, 2);
		assert_eq!(config.retry_delay, Duration::ZERO);
		assert_eq!(config.token_env, "MY_TOKEN");
	}
}
