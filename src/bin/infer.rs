//! Command line tool to run batch inference over a raw dataset and score the predictions

use std::{path::PathBuf, sync::Arc};

use anyhow::anyhow;
use burn::{backend::LibTorch, data::dataset::Dataset as _};
use burn_text_eval::{
    cli::{
        datasets::Dataset,
        devices::libtorch_device,
        models::{bert, Model as _},
        pipelines::Pipeline,
    },
    datasets::{Importer, Preprocessor, RawDataPreprocessor, TaskDataset},
    evaluation::{Evaluator, Metric, TaskEvaluator},
    models::bert::sequence_classification,
    pipelines::text_classification,
};
use log::info;
use pico_args::Arguments;
use rand::Rng;

const HELP: &str = "\
Usage: infer DATASET [OPTIONS]

Arguments:
  DATASET              A local CSV file, or a Hub file as 'hf://owner/repo/file.csv'

Options:
  -h, --help           Print help
  -m, --model          The model to use (e.g., 's-nlp/russian_toxicity_classifier')
  -d, --data-dir       Where predictions are written (defaults to 'data')
  -b, --batch-size     Batch size
  -l, --max-length     Maximum sequence length after tokenization
  --device             Compute device ('cpu', 'cuda', 'cuda:N', 'mps')
  --limit              Only run over the first N samples
  --metrics            Comma separated metrics (defaults to 'accuracy')
";

#[derive(Debug)]
struct Args {
    dataset: String,
    model: Option<String>,
    data_dir: Option<String>,
    batch_size: Option<usize>,
    max_length: Option<usize>,
    device: Option<String>,
    limit: Option<usize>,
    metrics: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            model: pargs.opt_value_from_str(["-m", "--model"])?,
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            max_length: pargs.opt_value_from_str(["-l", "--max-length"])?,
            device: pargs.opt_value_from_str("--device")?,
            limit: pargs.opt_value_from_str("--limit")?,
            metrics: pargs.opt_value_from_str("--metrics")?,
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let pipeline = Pipeline::TextClassification;

    let model = if let Some(model) = args.model.as_deref() {
        bert::Model::try_from(model)?
    } else {
        pipeline.default_model()
    };

    if !pipeline.supports(&model) {
        return Err(anyhow!(
            "Pipeline {} does not support {} model {}",
            pipeline,
            model.model_type(),
            model.name()
        ));
    }

    let metrics = args
        .metrics
        .as_deref()
        .unwrap_or("accuracy")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<Metric>)
        .collect::<Result<Vec<_>, _>>()?;

    let dataset = Dataset::try_from(args.dataset.as_str())?;

    info!("Importing {}...", dataset);

    let raw = dataset.importer().obtain().await?;

    let preprocessor = RawDataPreprocessor::default();

    let properties = preprocessor.analyze(&raw)?;
    println!("{}", serde_json::to_string_pretty(&properties)?);

    let mut data = preprocessor.transform(&raw)?;

    if let Some(limit) = args.limit {
        data.truncate(limit);
    }

    let dataset = Arc::new(TaskDataset::new(data)?);

    let mut config = text_classification::Config::new(model.name().to_string());

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(max_length) = args.max_length {
        config.max_length = max_length;
    }

    if let Some(device) = args.device {
        config.device = device;
    }

    let device = libtorch_device(&config.device)?;

    let pipeline =
        sequence_classification::load_pipeline::<LibTorch>(config, dataset.clone(), device).await?;

    let model_properties = pipeline.analyze_model()?;
    println!("{}", serde_json::to_string_pretty(&model_properties)?);

    if !dataset.is_empty() {
        let index = rand::thread_rng().gen_range(0..dataset.len());
        let sample = dataset.sample(index)?;
        let prediction = pipeline.infer_sample(&sample)?;

        println!(
            "\n=== Sample {index} ===\
             \n- Text: {}\
             \n- Prediction: {}\
             \n- Expected: {}\
             \n================",
            sample.source,
            prediction.as_deref().unwrap_or("<none>"),
            sample.target
        );
    }

    let predictions = pipeline.infer_dataset()?;

    let output = PathBuf::from(args.data_dir.as_deref().unwrap_or("data")).join("predictions.csv");
    predictions.to_csv(&output)?;

    info!("Predictions written to {}", output.display());

    let results = TaskEvaluator::new(&output, metrics).run()?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
