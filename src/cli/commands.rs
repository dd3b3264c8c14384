//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::instrument;

use crate::cli::args::{Cli, Commands, ScenarioCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{column::approx, FixedPolicy, Layer, Side, SimpsonTree};
use crate::realize::count_table;
use crate::scenario::Scenario;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let scenario = Scenario::load(cli.scenario.as_deref())?;

    match &cli.command {
        Some(Commands::Layers { depth }) => layers(&scenario, depth.unwrap_or(scenario.depth)),
        Some(Commands::Tree { depth }) => tree(&scenario, depth.unwrap_or(scenario.depth)),
        Some(Commands::Data { depth, sample_size }) => data(
            &scenario,
            depth.unwrap_or(scenario.depth),
            sample_size.unwrap_or(scenario.sample_size),
        ),
        Some(Commands::Check { depth }) => check(&scenario, depth.unwrap_or(scenario.depth)),
        Some(Commands::Scenario { command }) => match command {
            ScenarioCommands::Template => {
                output::info(&Scenario::template());
                Ok(())
            }
            ScenarioCommands::Show => {
                output::info(&scenario.to_toml()?);
                Ok(())
            }
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "simpson", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn generator(scenario: &Scenario) -> CliResult<SimpsonTree<FixedPolicy>> {
    Ok(SimpsonTree::new(scenario.root_pair()?, scenario.policy()?))
}

#[instrument(skip(scenario))]
fn layers(scenario: &Scenario, depth: usize) -> CliResult<()> {
    let mut tree = generator(scenario)?;
    for (k, layer) in tree.layers_to(depth)?.iter().enumerate() {
        output::header(&format!("Layer {k}"));
        for (i, pair) in layer.pairs().iter().enumerate() {
            output::detail(&format!(
                "{:<6} treatment {}   control {}",
                pair_label(k, i),
                pair.treatment(),
                pair.control()
            ));
        }
    }
    Ok(())
}

#[instrument(skip(scenario))]
fn tree(scenario: &Scenario, depth: usize) -> CliResult<()> {
    let mut tree = generator(scenario)?;
    let layers = tree.layers_to(depth)?;
    output::info(&pair_node(layers, 0, 0));
    Ok(())
}

/// The subtree rooted at pair `i` of layer `k`, rendered as a termtree node.
fn pair_node(layers: &[Layer], k: usize, i: usize) -> Tree<String> {
    let pair = &layers[k].pairs()[i];
    let label = format!(
        "{:<6} t {}   c {}",
        pair_label(k, i),
        pair.treatment(),
        pair.control()
    );
    let mut node = Tree::new(label);
    if k + 1 < layers.len() {
        node = node.with_leaves([
            pair_node(layers, k + 1, 2 * i),
            pair_node(layers, k + 1, 2 * i + 1),
        ]);
    }
    node
}

#[instrument(skip(scenario))]
fn data(scenario: &Scenario, depth: usize, sample_size: u64) -> CliResult<()> {
    let mut tree = generator(scenario)?;
    for (k, layer) in tree.layers_to(depth)?.iter().enumerate() {
        output::header(&format!("Layer {k} (n = {sample_size})"));
        for row in count_table(layer, k, sample_size)? {
            let prefix = if row.label.is_empty() {
                String::new()
            } else {
                format!("sub-population {}: ", row.label)
            };
            output::detail(&format!(
                "{prefix}treatment {}/{} recovered, control {}/{} recovered",
                row.treatment_recovered,
                row.treatment_total,
                row.control_recovered,
                row.control_total
            ));
        }
    }
    Ok(())
}

#[instrument(skip(scenario))]
fn check(scenario: &Scenario, depth: usize) -> CliResult<()> {
    let mut tree = generator(scenario)?;
    let layers = tree.layers_to(depth)?;
    let mut failures = 0;

    for (k, layer) in layers.iter().enumerate() {
        output::header(&format!("Layer {k}"));

        report(&mut failures, layer.len() == 1 << k, &format!("{} pairs", layer.len()));

        for side in [Side::Treatment, Side::Control] {
            let conserved = approx(layer.side_width(side), layers[0].side_width(side));
            report(&mut failures, conserved, &format!("{side} width conserved"));
        }

        if k > 0 {
            let parent = &layers[k - 1];
            let merged = layer.merged().is_some_and(|m| m.approx_eq(parent));
            report(&mut failures, merged, "merging adjacent pairs reconstructs the parent layer");

            let reversed = layer.pairs().iter().enumerate().all(|(i, pair)| {
                let above = &parent.pairs()[i / 2];
                let sign = pair.treatment().height() - pair.control().height();
                let parent_sign = above.treatment().height() - above.control().height();
                sign * parent_sign < 0.0
            });
            report(&mut failures, reversed, "ordering reversed against the parent layer");
        }
    }

    if failures > 0 {
        return Err(CliError::Check(format!("{failures} properties violated")));
    }
    Ok(())
}

fn report(failures: &mut u32, ok: bool, msg: &str) {
    if ok {
        output::success(msg);
    } else {
        output::failure(msg);
        *failures += 1;
    }
}

/// Binary path label for pair `i` of layer `k`; the root is unlabeled.
fn pair_label(k: usize, i: usize) -> String {
    if k == 0 {
        "root".to_string()
    } else {
        format!("{i:0width$b}", width = k)
    }
}
