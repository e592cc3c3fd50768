use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cbzview")]
#[command(version)]
#[command(about = "Read comic archives page by page, right to left", long_about = None)]
#[command(after_help = "Examples:\n  \
  cbzview ~/manga                      list the archives in a folder\n  \
  cbzview -l vol01.cbz                 list pages in reading order\n  \
  cbzview -p 5 -o page5.png vol01.cbz  decode page 5 and save it as PNG")]
pub struct Cli {
    /// Folder of archives, or a single archive
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// List pages (short format)
    #[arg(short = 'l')]
    pub list: bool,

    /// List pages verbosely with sizes and timestamps
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Page to decode, counted from 1 in reading order
    #[arg(short = 'p', long = "page", value_name = "N", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Write the decoded page to FILE (JPEG for .jpg/.jpeg, PNG otherwise)
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Quiet mode
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl Cli {
    pub fn is_listing(&self) -> bool {
        self.list || self.verbose
    }

    /// Forward steps needed from the opening page to reach `--page`
    pub fn steps(&self) -> usize {
        self.page.saturating_sub(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let cli = Cli::try_parse_from(["cbzview", "vol01.cbz"]).unwrap();
        assert_eq!(cli.page, 1);
        assert_eq!(cli.steps(), 0);
        assert!(!cli.is_listing());
        assert!(cli.output.is_none());
    }

    #[test]
    fn parses_page_and_output() {
        let cli = Cli::try_parse_from(["cbzview", "-p", "5", "-o", "out.png", "vol01.cbz"]).unwrap();
        assert_eq!(cli.steps(), 4);
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn rejects_page_zero() {
        assert!(Cli::try_parse_from(["cbzview", "-p", "0", "vol01.cbz"]).is_err());
    }
}
