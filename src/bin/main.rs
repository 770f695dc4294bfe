//! GDSVM Command Line Interface
//!
//! A command-line interface for training and evaluating a linear SVM with
//! mini-batch gradient descent, and for inspecting the optimizer's behavior
//! on a toy objective.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use gdsvm::api::SVM;
use gdsvm::core::{Dataset, Result, SVMError};
use gdsvm::trainer::quadratic_trace;
use gdsvm::utils::scaling::ScalingMethod;
use gdsvm::utils::validation;
use gdsvm::{DenseDataset, GdOptimizer};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gdsvm")]
#[command(about = "A linear SVM trained by mini-batch gradient descent with momentum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "GDSVM Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model and report accuracy on the training (and optional test) data
    Train(TrainArgs),
    /// Random-split evaluation on a single dataset
    Evaluate(EvaluateArgs),
    /// Compare descent trajectories with and without momentum on a toy objective
    Momentum(MomentumArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (CSV, last column is the label)
    #[arg(long)]
    data: PathBuf,

    /// Optional held-out test data file (CSV)
    #[arg(long)]
    test: Option<PathBuf>,

    #[command(flatten)]
    hyperparameters: HyperparameterArgs,

    /// Print detailed evaluation metrics
    #[arg(long)]
    detailed: bool,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Data file (CSV, last column is the label)
    #[arg(long)]
    data: PathBuf,

    /// Training ratio for the random split (0.0-1.0)
    #[arg(short, long, default_value = "0.8")]
    ratio: f64,

    #[command(flatten)]
    hyperparameters: HyperparameterArgs,
}

#[derive(Args)]
struct HyperparameterArgs {
    /// Penalty coefficient C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// Optimizer learning rate
    #[arg(short, long, default_value = "0.05")]
    learning_rate: f64,

    /// Optimizer momentum coefficient (0 disables momentum)
    #[arg(short, long, default_value = "0.0")]
    momentum: f64,

    /// Mini-batch size
    #[arg(short, long, default_value = "100")]
    batch_size: usize,

    /// Number of training iterations
    #[arg(short, long, default_value = "500")]
    iterations: usize,

    /// Seed for the random source (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Feature scaling method
    #[arg(long)]
    feature_scaling: Option<CliScalingMethod>,

    /// Prepend a constant bias column to every row
    #[arg(long)]
    add_bias: bool,
}

#[derive(Args)]
struct MomentumArgs {
    /// Learning rate for both trajectories
    #[arg(short, long, default_value = "1.0")]
    learning_rate: f64,

    /// Momentum coefficient for the second trajectory
    #[arg(short, long, default_value = "0.9")]
    momentum: f64,

    /// Number of descent steps
    #[arg(long, default_value = "200")]
    steps: usize,

    /// Starting parameter value
    #[arg(long, default_value = "10.0")]
    start: f64,

    /// Print every n-th step
    #[arg(long, default_value = "10")]
    print_every: usize,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliScalingMethod {
    /// Min-Max scaling to [-1, 1] range
    #[value(name = "minmax")]
    MinMax,
    /// Standard score (Z-score) normalization
    #[value(name = "standard")]
    StandardScore,
    /// Unit scaling by maximum absolute value
    #[value(name = "unit")]
    UnitScale,
}

impl From<CliScalingMethod> for ScalingMethod {
    fn from(cli_method: CliScalingMethod) -> Self {
        match cli_method {
            CliScalingMethod::MinMax => ScalingMethod::MinMax {
                min_val: -1.0,
                max_val: 1.0,
            },
            CliScalingMethod::StandardScore => ScalingMethod::StandardScore,
            CliScalingMethod::UnitScale => ScalingMethod::UnitScale,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Momentum(args) => momentum_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn build_svm(params: &HyperparameterArgs, dataset_len: usize) -> SVM {
    let batch_size = params.batch_size.min(dataset_len);
    if batch_size != params.batch_size {
        warn!(
            "Batch size {} exceeds dataset size, clamping to {}",
            params.batch_size, batch_size
        );
    }

    let mut builder = SVM::new()
        .with_c(params.c)
        .with_learning_rate(params.learning_rate)
        .with_momentum(params.momentum)
        .with_batch_size(batch_size)
        .with_iterations(params.iterations);

    if let Some(seed) = params.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(scaling_method) = &params.feature_scaling {
        info!("Using feature scaling: {scaling_method:?}");
        builder = builder.with_feature_scaling(scaling_method.clone().into());
    }
    if params.add_bias {
        builder = builder.with_bias_column();
    }

    builder
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Training SVM model...");
    info!("Data file: {:?}", args.data);
    info!(
        "Parameters: C={}, lr={}, momentum={}, batch_size={}, iterations={}",
        args.hyperparameters.c,
        args.hyperparameters.learning_rate,
        args.hyperparameters.momentum,
        args.hyperparameters.batch_size,
        args.hyperparameters.iterations
    );

    let dataset = DenseDataset::from_csv_file(&args.data)?;
    info!(
        "Loaded {} samples with {} dimensions",
        dataset.len(),
        dataset.dim()
    );

    if dataset.len() < 2 {
        return Err(SVMError::InvalidDataset(
            "Dataset must contain at least 2 samples".to_string(),
        ));
    }

    let (positive, negative, ratio) = validation::check_label_balance(&dataset);
    if !(0.2..=5.0).contains(&ratio) {
        warn!("Labels are heavily imbalanced: {positive} positive vs {negative} negative");
    }

    let model = build_svm(&args.hyperparameters, dataset.len()).train(&dataset)?;

    info!("Training completed successfully");

    let model_info = model.info();
    println!("=== Training Results ===");
    println!("Feature count: {}", model_info.feature_count);
    println!("Weight norm: {:.6}", model_info.weight_norm);
    println!(
        "Training accuracy: {:.2}%",
        model.evaluate(&dataset)? * 100.0
    );
    println!(
        "Mean training hinge loss: {:.6}",
        model.mean_hinge_loss(&dataset)?
    );

    if let Some(test_path) = &args.test {
        info!("Loading test data from: {test_path:?}");
        let test_dataset = DenseDataset::from_csv_file(test_path)?;
        println!("\nTest Results:");
        println!(
            "  Accuracy: {:.2}%",
            model.evaluate(&test_dataset)? * 100.0
        );
        println!(
            "  Mean hinge loss: {:.6}",
            model.mean_hinge_loss(&test_dataset)?
        );

        if args.detailed {
            let metrics = model.evaluate_detailed(&test_dataset)?;
            println!("\nDetailed Metrics:");
            println!("  True Positives:  {}", metrics.true_positives);
            println!("  True Negatives:  {}", metrics.true_negatives);
            println!("  False Positives: {}", metrics.false_positives);
            println!("  False Negatives: {}", metrics.false_negatives);
            println!("  Precision:       {:.4}", metrics.precision());
            println!("  Recall:          {:.4}", metrics.recall());
            println!("  F1 Score:        {:.4}", metrics.f1_score());
            println!("  Specificity:     {:.4}", metrics.specificity());
        }
    } else if args.detailed {
        let metrics = model.evaluate_detailed(&dataset)?;
        println!("\nDetailed Metrics (training data):");
        println!("  Precision:   {:.4}", metrics.precision());
        println!("  Recall:      {:.4}", metrics.recall());
        println!("  F1 Score:    {:.4}", metrics.f1_score());
        println!("  Specificity: {:.4}", metrics.specificity());
    }

    Ok(())
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    info!(
        "Random-split evaluation on {:?} with ratio {}",
        args.data, args.ratio
    );

    let dataset = DenseDataset::from_csv_file(&args.data)?;
    let seed = args.hyperparameters.seed.unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let (train, test) = dataset.split(args.ratio, &mut rng)?;

    info!(
        "Split {} samples into {} train / {} test",
        dataset.len(),
        train.len(),
        test.len()
    );

    let model = build_svm(&args.hyperparameters, train.len()).train(&train)?;

    println!("=== Split Evaluation Results ===");
    println!("Data file: {:?}", args.data);
    println!("Train/test ratio: {:.1}/{:.1}", args.ratio, 1.0 - args.ratio);
    println!("C parameter: {}", args.hyperparameters.c);
    println!(
        "Train accuracy: {:.2}%",
        model.evaluate(&train)? * 100.0
    );
    println!("Test accuracy: {:.2}%", model.evaluate(&test)? * 100.0);

    Ok(())
}

fn momentum_command(args: MomentumArgs) -> Result<()> {
    info!(
        "Descending 0.01*w^2 from w={} for {} steps",
        args.start, args.steps
    );

    let mut plain = GdOptimizer::new(args.learning_rate, 0.0)?;
    let mut with_momentum = GdOptimizer::new(args.learning_rate, args.momentum)?;

    let plain_trace = quadratic_trace(&mut plain, args.start, args.steps)?;
    let momentum_trace = quadratic_trace(&mut with_momentum, args.start, args.steps)?;

    println!("=== Momentum Comparison on f(w) = 0.01*w^2 ===");
    println!(
        "{:>6}  {:>14}  {:>14}",
        "step",
        "beta=0.00",
        format!("beta={:.2}", args.momentum)
    );
    let print_every = args.print_every.max(1);
    for step in (0..=args.steps).step_by(print_every) {
        println!(
            "{:>6}  {:>14.6}  {:>14.6}",
            step, plain_trace[step], momentum_trace[step]
        );
    }
    if args.steps % print_every != 0 {
        println!(
            "{:>6}  {:>14.6}  {:>14.6}",
            args.steps, plain_trace[args.steps], momentum_trace[args.steps]
        );
    }

    Ok(())
}
