use anyhow::{anyhow, bail, Context};
use treegp::config::{AppConfig, ConfigManager, CreatorKind};
use treegp::data::{CsvConnector, Dataset, Variable};
use treegp::engines::generation::{
    best_index, evaluate_population, initialize_population, BalancedTreeCreator,
    ProbabilisticTreeCreator,
};
use treegp::functions::Grammar;
use treegp::random::Random;
use treegp::tree::Tree;
use treegp::utils::InfixFormatter;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: treegp <config-file>"))?;

    let manager = ConfigManager::new();
    manager
        .load_from_file(&path)
        .with_context(|| format!("loading configuration from {}", path))?;
    let config = manager.get()?;

    let dataset = CsvConnector::load_dataset(&config.evaluation.dataset, None)
        .with_context(|| format!("loading dataset {}", config.evaluation.dataset.display()))?;

    let target_name = &config.evaluation.target;
    let target = dataset
        .values_by_name(target_name)
        .ok_or_else(|| anyhow!("target column '{}' not found", target_name))?;
    let variables = dataset.input_variables(target_name);
    if variables.is_empty() {
        log::warn!("No input variables besides '{}', trees will only use constants", target_name);
    }

    let range = config.evaluation.training_range(dataset.rows())?;
    dataset.check_range(range)?;
    let grammar = config.grammar.to_grammar()?;

    let trees = create_population(&config, &grammar, &variables);
    log::info!(
        "Created {} trees with the {:?} creator",
        trees.len(),
        config.creator.kind
    );

    let fitness = evaluate_population(&trees, &dataset, &target[range.start..range.end], range);
    let Some(best) = best_index(&fitness) else {
        bail!("population is empty");
    };

    report(&trees[best], fitness[best], &dataset);
    Ok(())
}

fn create_population(config: &AppConfig, grammar: &Grammar, variables: &[Variable]) -> Vec<Tree> {
    let creator = &config.creator;
    let evaluation = &config.evaluation;
    let mut rng = Random::new(evaluation.seed);

    match creator.kind {
        CreatorKind::Balanced => initialize_population(
            &BalancedTreeCreator::new(creator.max_length, creator.irregularity_bias),
            grammar,
            variables,
            creator.length_distribution(),
            creator.max_depth,
            evaluation.population_size,
            &mut rng,
        ),
        CreatorKind::Probabilistic => initialize_population(
            &ProbabilisticTreeCreator::new(creator.max_length),
            grammar,
            variables,
            creator.length_distribution(),
            creator.max_depth,
            evaluation.population_size,
            &mut rng,
        ),
    }
}

fn report(tree: &Tree, fitness: f64, dataset: &Dataset) {
    log::info!(
        "Best tree: R2 = {:.6}, length {}, depth {}",
        fitness,
        tree.len(),
        tree.depth()
    );
    println!("{:.6}\t{}", fitness, InfixFormatter::format(tree, dataset, 4));
}
