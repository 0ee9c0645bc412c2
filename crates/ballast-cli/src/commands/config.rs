//! Config command implementation.
//!
//! Lists, shows and validates analytics policies.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use ballast_config::{ConfigError, ConfigManager, PolicyConfig};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{emit, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the active policy
    Show,

    /// List the built-in policies
    List,

    /// Validate a policy file, reporting every violation
    Validate(ValidateArgs),

    /// Print the active policy as TOML, ready to edit
    Template,
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Policy file (.toml or .json)
    pub path: PathBuf,
}

fn policy_rows(policy: &PolicyConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("name", policy.name.clone()),
        KeyValue::new(
            "description",
            policy.description.clone().unwrap_or_default(),
        ),
        KeyValue::new("survival.min_lcr_pct", policy.survival.min_lcr_pct.to_string()),
        KeyValue::new(
            "survival.require_positive_liquid",
            policy.survival.require_positive_liquid.to_string(),
        ),
        KeyValue::new(
            "survival.undefined_lcr_passes",
            policy.survival.undefined_lcr_passes.to_string(),
        ),
        KeyValue::new(
            "ratio_factors.outflow_factor",
            policy.ratio_factors.outflow_factor.to_string(),
        ),
        KeyValue::new(
            "ratio_factors.wholesale_asf_factor",
            policy.ratio_factors.wholesale_asf_factor.to_string(),
        ),
        KeyValue::new(
            "cost_model.bad_loss_rate",
            policy.cost_model.bad_loss_rate.to_string(),
        ),
        KeyValue::new(
            "cost_model.opportunity_cost_rate",
            policy.cost_model.opportunity_cost_rate.to_string(),
        ),
        KeyValue::new(
            "cost_model.avg_loan_amount",
            policy.cost_model.avg_loan_amount.to_string(),
        ),
        KeyValue::new(
            "grid",
            format!(
                "{} points in [{}, {}]",
                policy.grid.points, policy.grid.min, policy.grid.max
            ),
        ),
        KeyValue::new(
            "simulation.horizon_days",
            policy.simulation.horizon_days.to_string(),
        ),
        KeyValue::new(
            "simulation.stress_level",
            policy.simulation.stress_level.to_string(),
        ),
    ]
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let rows = policy_rows(&ctx.policy);
            emit(
                ctx.format,
                &format!("Policy {}", ctx.policy.name),
                &ctx.policy,
                &rows,
                &ctx.policy.name,
            )
        }
        ConfigCommand::List => {
            let manager = ConfigManager::new();
            let policies = manager
                .names()
                .iter()
                .map(|n| manager.get(n))
                .collect::<Result<Vec<_>, _>>()?;
            let rows: Vec<KeyValue> = policies
                .iter()
                .map(|p| KeyValue::new(p.name.clone(), p.description.clone().unwrap_or_default()))
                .collect();
            emit(
                ctx.format,
                "Policies",
                &policies,
                &rows,
                manager.names().join(","),
            )
        }
        ConfigCommand::Validate(validate) => match PolicyConfig::from_path(&validate.path) {
            Ok(policy) => {
                if ctx.format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&policy)?);
                } else {
                    print_success(&format!(
                        "{} is a valid policy ({})",
                        validate.path.display(),
                        policy.name
                    ));
                }
                Ok(())
            }
            Err(ConfigError::MultipleValidationErrors(errors)) => {
                for error in &errors {
                    print_warning(&error.to_string());
                }
                anyhow::bail!("{} violations in {}", errors.len(), validate.path.display())
            }
            Err(err) => Err(err.into()),
        },
        ConfigCommand::Template => {
            print!("{}", ctx.policy.to_toml_string()?);
            Ok(())
        }
    }
}
