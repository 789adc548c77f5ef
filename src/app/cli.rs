use argparse::{ArgumentParser, List, Store, StoreOption, StoreTrue};
use std::io;

use crate::constants;

/// Command line options.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub out_dir: String,
    pub worklist: Option<String>,
    pub triples: Vec<String>,
    pub verify: bool,
    pub list: bool,
    pub verbose: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        CliArgs {
            out_dir: constants::DEFAULT_OUT_DIR.to_string(),
            worklist: None,
            triples: Vec::new(),
            verify: false,
            list: false,
            verbose: false,
        }
    }
}

/// Parses `args` (program name first). `Err` carries the exit code argparse wants,
/// which is 0 after `--help`.
pub fn parse_args_from(args: Vec<String>) -> Result<CliArgs, i32> {
    let mut cli = CliArgs::default();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description(constants::DESCRIPTION);
        ap.refer(&mut cli.out_dir).add_option(
            &["-o", "--out-dir"],
            Store,
            "Directory to write cartridges into (default: current directory)",
        );
        ap.refer(&mut cli.worklist).add_option(
            &["-w", "--worklist"],
            StoreOption,
            "File with one 'mbc,rom,ram' triple per line",
        );
        ap.refer(&mut cli.verify).add_option(
            &["--verify"],
            StoreTrue,
            "Re-read every generated cartridge and check its layout",
        );
        ap.refer(&mut cli.list).add_option(
            &["--list"],
            StoreTrue,
            "Print the supported MBC types, ROM sizes and RAM sizes",
        );
        ap.refer(&mut cli.verbose)
            .add_option(&["-v", "--verbose"], StoreTrue, "Debug logging");
        ap.refer(&mut cli.triples).add_argument(
            "triple",
            List,
            "Cartridges to generate as 'mbc,rom,ram' codes, e.g. 0x01,0x03,0x02",
        );
        ap.parse(args, &mut io::stdout(), &mut io::stderr())?;
    }
    Ok(cli)
}
