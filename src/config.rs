//config.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::images::DEFAULT_TIMEOUT;

pub const DEFAULT_OUTPUT: &str = "postural_routines.json";
pub const DEFAULT_CACHE_DIR: &str = ".img_cache";

#[derive(Parser, Debug)]
#[command(
    name = "postural-plan",
    about = "Generate the postural routines file with embedded images"
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the plan and write it (the default)
    Generate,
    /// Validate an existing routines file and print its summary
    Check { file: PathBuf },
}

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Directory holding the bundled illustrations [default: ~/Documents/post/img]
    #[arg(long, env = "POSTURAL_IMAGE_DIR")]
    pub image_dir: Option<PathBuf>,

    /// Where downloaded images are kept between runs
    #[arg(long, env = "POSTURAL_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    #[arg(long, short = 'o', env = "POSTURAL_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Per-download timeout
    #[arg(long, env = "POSTURAL_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub image_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub output: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_args(args: &PathArgs) -> Self {
        let image_dir = args.image_dir.clone().unwrap_or_else(default_image_dir);
        Settings {
            image_dir,
            cache_dir: args.cache_dir.clone(),
            output: args.output.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}

fn default_image_dir() -> PathBuf {
    image_dir_under(dirs::home_dir())
}

fn image_dir_under(home: Option<PathBuf>) -> PathBuf {
    let relative = Path::new("Documents").join("post").join("img");
    match home {
        Some(home) => home.join(relative),
        None => {
            warn!(
                image_dir = %relative.display(),
                "no home directory found, looking for images relative to the working directory"
            );
            relative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_generate_with_defaults() {
        let cli = Cli::try_parse_from(["postural-plan"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);

        let settings = Settings::from_args(&cli.paths);
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
        assert_eq!(settings.timeout, Duration::from_secs(15));
        assert!(settings.image_dir.ends_with("Documents/post/img"));
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "postural-plan",
            "--image-dir",
            "/tmp/img",
            "-o",
            "out.json",
            "--timeout-secs",
            "3",
            "generate",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Generate)));

        let settings = Settings::from_args(&cli.paths);
        assert_eq!(settings.image_dir, PathBuf::from("/tmp/img"));
        assert_eq!(settings.output, PathBuf::from("out.json"));
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn check_takes_a_file() {
        let cli = Cli::try_parse_from(["postural-plan", "check", "plan.json", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Command::Check { file }) => assert_eq!(file, PathBuf::from("plan.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn image_dir_falls_back_to_relative_without_home() {
        assert_eq!(
            image_dir_under(Some(PathBuf::from("/home/ana"))),
            PathBuf::from("/home/ana/Documents/post/img")
        );
        let fallback = image_dir_under(None);
        assert!(fallback.is_relative());
        assert_eq!(fallback, PathBuf::from("Documents/post/img"));
    }
}
