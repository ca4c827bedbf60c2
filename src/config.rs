use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which dashboard the window opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DashboardMode {
    /// Any table: one categorical filter, KPIs, trend, distribution, group means
    #[default]
    Explorer,
    /// State → District → Category → Indicator lookup of NFHS 4 / NFHS 5 change
    District,
}

impl DashboardMode {
    pub fn label(self) -> &'static str {
        match self {
            DashboardMode::Explorer => "Explorer",
            DashboardMode::District => "District lookup",
        }
    }
}

/// NFHS change dashboard for Indian states and districts.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Data file to open at start-up (.csv, .tsv or .json)
    pub path: Option<PathBuf>,

    /// Dashboard to show first
    #[arg(long, value_enum, default_value_t = DashboardMode::Explorer)]
    pub mode: DashboardMode,

    /// Maximum number of KPI cards (numeric column means)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub kpis: u16,

    /// Number of histogram bins in the distribution chart
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=500))]
    pub bins: u16,
}

/// Display settings derived from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub max_kpis: usize,
    pub histogram_bins: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            max_kpis: 4,
            histogram_bins: 20,
        }
    }
}

impl From<&Cli> for ViewSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            max_kpis: cli.kpis as usize,
            histogram_bins: cli.bins as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_view_settings() {
        let cli = Cli::try_parse_from(["india-change-dashboard"]).unwrap();
        assert_eq!(cli.path, None);
        assert_eq!(cli.mode, DashboardMode::Explorer);
        assert_eq!(ViewSettings::from(&cli), ViewSettings::default());
    }

    #[test]
    fn parses_path_and_options() {
        let cli = Cli::try_parse_from([
            "india-change-dashboard",
            "India_Change.csv",
            "--mode",
            "district",
            "--bins",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("India_Change.csv")));
        assert_eq!(cli.mode, DashboardMode::District);
        assert_eq!(ViewSettings::from(&cli).histogram_bins, 30);
    }

    #[test]
    fn rejects_zero_bins() {
        assert!(Cli::try_parse_from(["india-change-dashboard", "--bins", "0"]).is_err());
    }
}
