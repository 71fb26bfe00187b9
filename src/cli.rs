//! Command line interface for careerwise, built on clap.
//!
//! Two subcommands mirror the two workflows: `advice` and `resume`.
//! Credentials, timeout and config path are global flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Career advice and resume tailoring from the terminal.
#[derive(Debug, Parser)]
#[command(name = "careerwise", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Username for the access gate.
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Password for the access gate.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Seconds to wait for the model before giving up.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Path to a config file (defaults to ./careerwise.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the run's audit record as JSON after it finishes.
    #[arg(long, global = true, default_value_t = false)]
    pub audit: bool,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Suggest career paths for a profile.
    Advice {
        /// Profile answers as a .toml or .json file.
        #[arg(long)]
        profile: PathBuf,
    },

    /// Rewrite a PDF resume for a job description.
    Resume {
        /// The resume to tailor (PDF).
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Job description text.
        #[arg(long, conflicts_with = "job_file")]
        job_description: Option<String>,

        /// Read the job description from a file.
        #[arg(long)]
        job_file: Option<PathBuf>,

        /// Where tailored_resume.txt is written.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_advice_subcommand() {
        let cli = Cli::parse_from(["careerwise", "advice", "--profile", "me.toml"]);
        match cli.command {
            Command::Advice { profile } => assert_eq!(profile, PathBuf::from("me.toml")),
            _ => panic!("expected Advice command"),
        }
        assert!(cli.username.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_parses_resume_subcommand() {
        let cli = Cli::parse_from([
            "careerwise",
            "resume",
            "--resume",
            "alice.pdf",
            "--job-description",
            "Senior Engineer",
        ]);
        match cli.command {
            Command::Resume {
                resume,
                job_description,
                job_file,
                out_dir,
            } => {
                assert_eq!(resume, Some(PathBuf::from("alice.pdf")));
                assert_eq!(job_description.as_deref(), Some("Senior Engineer"));
                assert!(job_file.is_none());
                assert_eq!(out_dir, PathBuf::from("."));
            }
            _ => panic!("expected Resume command"),
        }
    }

    #[test]
    fn job_text_and_job_file_conflict() {
        let result = Cli::try_parse_from([
            "careerwise",
            "resume",
            "--job-description",
            "x",
            "--job-file",
            "jd.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "careerwise",
            "--username",
            "ada",
            "--password",
            "secret",
            "--timeout-secs",
            "30",
            "--verbose",
            "advice",
            "--profile",
            "p.json",
        ]);
        assert_eq!(cli.username.as_deref(), Some("ada"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.timeout_secs, Some(30));
        assert!(cli.verbose);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Cli::try_parse_from([
            "careerwise",
            "--timeout-secs",
            "0",
            "advice",
            "--profile",
            "p.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
