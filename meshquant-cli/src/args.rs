//! Defines `Args` which is used to parse command line arguments.

use std::path::PathBuf;

use structopt::StructOpt;
use meshquant::{
    normalize::Method,
    pipeline::Config,
    quantize::BinCount,
};


#[derive(StructOpt, Debug)]
#[structopt(setting = structopt::clap::AppSettings::VersionlessSubcommands)]
pub struct Args {
    #[structopt(flatten)]
    pub global: GlobalArgs,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub struct GlobalArgs {
    /// Number of sample rows (vertices, bins, ...) printed per point set.
    /// Defaults to 5 for `info` and `normalize` and to 3 for `run`.
    #[structopt(long = "samples", global = true)]
    pub samples: Option<usize>,
}

impl GlobalArgs {
    pub fn samples_or(&self, default: usize) -> usize {
        self.samples.unwrap_or(default)
    }
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Print vertex count, per-axis statistics and the first vertices of a
    /// mesh file or of all `.obj` files in a directory.
    #[structopt(name = "info")]
    Info {
        #[structopt(flatten)]
        args: InfoArgs,
    },

    /// Print normalization parameters and the first normalized vertices.
    #[structopt(name = "normalize")]
    Normalize {
        #[structopt(flatten)]
        args: NormalizeArgs,
    },

    /// Normalize, quantize and reconstruct all meshes of a directory and
    /// report the reconstruction error.
    #[structopt(name = "run")]
    Run {
        #[structopt(flatten)]
        args: RunArgs,
    },
}

#[derive(StructOpt, Debug)]
pub struct InfoArgs {
    /// Path to an `.obj` file or a directory containing `.obj` files.
    #[structopt(parse(from_os_str))]
    pub path: PathBuf,
}

#[derive(StructOpt, Debug)]
pub struct NormalizeArgs {
    /// Normalization method to use. Can be given multiple times. Valid
    /// values: minmax, unitsphere. Defaults to minmax.
    #[structopt(short = "m", long = "method", number_of_values = 1)]
    pub methods: Vec<Method>,

    /// Path to an `.obj` file or a directory containing `.obj` files.
    #[structopt(parse(from_os_str))]
    pub path: PathBuf,
}

#[derive(StructOpt, Debug)]
pub struct RunArgs {
    /// Directory containing the `.obj` files to process.
    #[structopt(default_value = "8samples", parse(from_os_str))]
    pub input_dir: PathBuf,

    /// Number of quantization bins per coordinate (at least 2). 1024 bins
    /// correspond to 10 bit precision.
    #[structopt(short = "b", long = "bins", default_value = "1024")]
    pub bins: BinCount,

    /// Normalization method to run. Can be given multiple times. Valid
    /// values: minmax, unitsphere. Defaults to both.
    #[structopt(short = "m", long = "method", number_of_values = 1)]
    pub methods: Vec<Method>,

    /// If set, neither the normalized and reconstructed meshes nor the
    /// summary table are written.
    #[structopt(long = "no-save")]
    pub no_save: bool,

    /// Path of the CSV summary table.
    #[structopt(
        short = "s",
        long = "summary",
        default_value = "mesh_summary.csv",
        parse(from_os_str)
    )]
    pub summary: PathBuf,

    /// Directory in which `output_normalized/` and `output_reconstructed/`
    /// are created.
    #[structopt(short = "o", long = "output-dir", default_value = ".", parse(from_os_str))]
    pub output_dir: PathBuf,

    /// Skip meshes that fail to process instead of aborting the whole run.
    #[structopt(long = "keep-going")]
    pub keep_going: bool,

    /// Don't print the per-axis error chart.
    #[structopt(long = "no-chart")]
    pub no_chart: bool,
}

impl RunArgs {
    pub fn to_config(&self) -> Config {
        let methods = if self.methods.is_empty() {
            Method::ALL.to_vec()
        } else {
            self.methods.clone()
        };

        Config {
            input_dir: self.input_dir.clone(),
            n_bins: self.bins,
            save_results: !self.no_save,
            summary_file: self.summary.clone(),
            output_dir: self.output_dir.clone(),
            methods,
            keep_going: self.keep_going,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults() {
        let args = Args::from_iter(&["meshquant", "run"]);
        let config = match &args.command {
            Command::Run { args } => args.to_config(),
            other => panic!("unexpected command {:?}", other),
        };

        assert_eq!(config, Config::default());
    }

    #[test]
    fn run_flags() {
        let args = Args::from_iter(&[
            "meshquant", "run", "meshes", "-b", "256", "-m", "unitsphere", "--no-save",
            "--keep-going",
        ]);
        let config = match &args.command {
            Command::Run { args } => args.to_config(),
            other => panic!("unexpected command {:?}", other),
        };

        assert_eq!(config.input_dir, PathBuf::from("meshes"));
        assert_eq!(config.n_bins.get(), 256);
        assert_eq!(config.methods, vec![Method::UnitSphere]);
        assert!(!config.save_results);
        assert!(config.keep_going);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Args::from_iter_safe(&["meshquant", "run", "-b", "1"]).is_err());
        assert!(Args::from_iter_safe(&["meshquant", "run", "-m", "cube"]).is_err());
    }
}
