mod objectives;

use anyhow::{anyhow, Result};
use clap::{arg, Command};
use dgc_evaluator::evaluate_population;
use dgc_structs::config::{EvaluatorConfig, ExecutionMode};
use dgc_structs::core::Fitness;
use objectives::Objective;
use serde_json::json;
use std::{fs, sync::Arc};

fn cli() -> Command {
    Command::new("dgc-runtime")
        .about("Runs population evaluation passes")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("evaluate")
                .about("Scores a population of real-vector individuals")
                .arg(
                    arg!(<POPULATION> "Population json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<OBJECTIVE> "Objective name (sphere, rastrigin)")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--mode [MODE] "Execution mode (thread_pool or accelerator_batch)")
                        .default_value("thread_pool")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--units [UNITS] "Number of execution units")
                        .default_value("4")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"block-size" [BLOCK_SIZE] "Max individuals per accelerator launch")
                        .default_value("128")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--alignment [ALIGNMENT] "Sub-batch alignment granularity")
                        .default_value("256")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Prints the slice assignment for a population size")
                .arg(
                    arg!(<POPULATION_SIZE> "Number of individuals")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(arg!(<UNITS> "Number of execution units").value_parser(clap::value_parser!(u32))),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("evaluate", sub_m)) => evaluate(
            sub_m.get_one::<String>("POPULATION").unwrap().clone(),
            sub_m.get_one::<String>("OBJECTIVE").unwrap().clone(),
            sub_m.get_one::<String>("mode").unwrap().clone(),
            *sub_m.get_one::<u32>("units").unwrap(),
            *sub_m.get_one::<u32>("block-size").unwrap(),
            *sub_m.get_one::<u32>("alignment").unwrap(),
        ),
        Some(("plan", sub_m)) => print_plan(
            *sub_m.get_one::<usize>("POPULATION_SIZE").unwrap(),
            *sub_m.get_one::<u32>("UNITS").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn evaluate(
    population: String,
    objective: String,
    mode: String,
    units: u32,
    block_size: u32,
    alignment: u32,
) -> Result<()> {
    let population = Arc::new(load_population(&population)?);
    let objective = Objective::from_name(&objective)?;
    let mode = match mode.as_str() {
        "thread_pool" => ExecutionMode::ThreadPool,
        "accelerator_batch" => ExecutionMode::AcceleratorBatch,
        _ => return Err(anyhow!("Unknown execution mode '{}'", mode)),
    };
    let config = EvaluatorConfig {
        mode,
        max_units: units,
        block_size,
        alignment,
    };

    eprintln!(
        "[runtime] evaluating {} individuals across {} units",
        population.len(),
        units
    );
    let mut results: Vec<Option<Fitness>> = vec![None; population.len()];
    let report = evaluate_population(config, Arc::clone(&population), Arc::new(objective), &mut results)?;
    eprintln!(
        "[runtime] scored {} of {} individuals in {}ms ({} failures)",
        report.num_scored,
        report.population_size,
        report.elapsed_ms,
        report.failures.len()
    );

    let fitness: Vec<Fitness> = results.into_iter().map(|slot| slot.unwrap()).collect();
    println!(
        "{}",
        serde_json::to_string(&json!({
            "fitness": fitness,
            "report": report,
        }))?
    );
    Ok(())
}

fn print_plan(population_size: usize, units: u32) -> Result<()> {
    let plans = dgc_evaluator::plan(population_size, units)?;
    println!("{}", serde_json::to_string(&plans)?);
    Ok(())
}

fn load_population(population: &str) -> Result<Vec<Vec<f64>>> {
    let population = if population.ends_with(".json") {
        fs::read_to_string(population)
            .map_err(|e| anyhow!("Failed to read population file: {}", e))?
    } else {
        population.to_string()
    };
    serde_json::from_str::<Vec<Vec<f64>>>(&population)
        .map_err(|e| anyhow!("Failed to parse population: {}", e))
}
