use anyhow::{Context, Result};
use clap::Parser;
use cv_primer::tools::load_rgb;
use cv_primer::{DirectoryPresenter, PausingPresenter, Presenter, Walkthrough, WalkthroughConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cv_primer",
    version,
    about = "Walk an image through grayscale, edges, contours, thresholding, morphology and masking"
)]
struct Cli {
    /// Path to the input image
    #[arg(short, long)]
    image: PathBuf,
    /// Directory that receives one PNG per stage
    #[arg(short, long, default_value = "cv_primer_out")]
    out_dir: PathBuf,
    /// JSON file overriding the default parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Do not wait for Enter between stages
    #[arg(long)]
    no_wait: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => cv_primer::load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WalkthroughConfig::default(),
    };

    let image = load_rgb(&cli.image)
        .with_context(|| format!("Failed to load image {}", cli.image.display()))?;
    println!(
        "Image: {} ({}x{})",
        cli.image.display(),
        image.width(),
        image.height()
    );

    let saver = DirectoryPresenter::new(&cli.out_dir)
        .with_context(|| format!("Failed to create output directory {}", cli.out_dir.display()))?;
    let pause = !cli.no_wait && io::stdin().is_terminal();
    let mut presenter: Box<dyn Presenter> = if pause {
        Box::new(PausingPresenter::new(
            saver,
            io::stdin().lock(),
            io::stdout(),
        ))
    } else {
        Box::new(saver)
    };

    let report = Walkthrough::new(config)
        .run(&image, &mut presenter)
        .context("Walkthrough failed")?;

    println!("Stages written to {}", cli.out_dir.display());
    for timing in &report.timings {
        println!(
            "  {:<18} {:.2?}",
            timing.stage.file_name(),
            timing.elapsed
        );
    }
    println!("Total time: {:.2?}", report.total_time());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cv_primer", "-i", "shapes.png"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("shapes.png"));
        assert_eq!(cli.out_dir, PathBuf::from("cv_primer_out"));
        assert!(cli.config.is_none());
        assert!(!cli.no_wait);
    }

    #[test]
    fn test_image_is_required() {
        assert!(Cli::try_parse_from(["cv_primer", "--no-wait"]).is_err());
    }
}
