use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::locale::{Locale, LocaleBundle};
use crate::validator::MagnitudeGuard;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mortgage-calculator")]
#[command(about = "Terminal mortgage repayment calculator")]
pub struct CliConfig {
    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub locale: Locale,

    #[arg(long, help = "Load display text from a JSON bundle instead of --locale")]
    pub locale_file: Option<PathBuf>,

    #[arg(long, help = "Reject the submit when any of amount, term or rate is not positive")]
    pub strict_magnitude: bool,

    #[arg(long, default_value = "mortgage-calculator.log")]
    pub log_file: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn magnitude_guard(&self) -> MagnitudeGuard {
        if self.strict_magnitude {
            MagnitudeGuard::AnyNonPositive
        } else {
            MagnitudeGuard::AllNonPositive
        }
    }

    pub fn load_bundle(&self) -> Result<LocaleBundle> {
        match &self.locale_file {
            Some(path) => LocaleBundle::from_file(path),
            None => LocaleBundle::embedded(self.locale),
        }
    }
}
