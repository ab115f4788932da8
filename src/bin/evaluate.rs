//! Command line tool to score an existing predictions file

use anyhow::anyhow;
use burn_text_eval::evaluation::{Evaluator, Metric, TaskEvaluator};
use pico_args::Arguments;

const HELP: &str = "\
Usage: evaluate PREDICTIONS [OPTIONS]

Arguments:
  PREDICTIONS          A CSV file with 'target' and 'prediction' columns

Options:
  -h, --help           Print help
  --metrics            Comma separated metrics (defaults to 'accuracy')
";

#[derive(Debug)]
struct Args {
    predictions: String,
    metrics: Vec<Metric>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let metrics: Option<String> = pargs.opt_value_from_str("--metrics")?;

        let args = Args {
            metrics: metrics
                .as_deref()
                .unwrap_or("accuracy")
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::parse::<Metric>)
                .collect::<Result<_, _>>()?,
            predictions: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => {
                    anyhow!("Missing required argument: PREDICTIONS")
                }
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let results = TaskEvaluator::new(&args.predictions, args.metrics).run()?;

    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
