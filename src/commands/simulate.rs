use crate::{
    libs::{
        config::{Config, HarvestConfig},
        formatter::{format_money, format_percent},
        messages::Message,
        metrics::{self, LossTier},
        validation,
        view::View,
    },
    msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

/// Default cutting width of a single-row harvester, in metres.
pub const DEFAULT_CUT_WIDTH_M: f64 = 1.5;

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Harvested area in hectares
    #[arg(short, long)]
    area: f64,

    /// Expected yield in tonnes per hectare
    #[arg(short = 'y', long = "yield")]
    expected_yield: f64,

    /// Observed loss percentage
    #[arg(short, long)]
    loss: f64,

    /// Price per tonne [default: configured price]
    #[arg(short, long)]
    price: Option<f64>,

    /// Target loss percentage [default: configured target]
    #[arg(short, long)]
    target: Option<f64>,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    harvests_per_year: u32,

    /// Harvester speed in km/h, enables the duration estimate
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_CUT_WIDTH_M)]
    cut_width: f64,
}

/// Inputs of a what-if calculation, with defaults already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    pub area: f64,
    pub expected_yield: f64,
    pub loss_pct: f64,
    pub price_per_tonne: f64,
    pub target_loss_pct: f64,
    pub harvests_per_year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOutcome {
    pub gross_tonnes: f64,
    pub tonnes_lost: f64,
    pub tonnes_harvested: f64,
    pub financial_loss: f64,
    pub efficiency: f64,
    pub tier: LossTier,
    pub potential_savings: f64,
    pub annual_savings: f64,
}

impl Simulation {
    pub fn new(area: f64, expected_yield: f64, loss_pct: f64, config: &HarvestConfig) -> Self {
        Simulation {
            area,
            expected_yield,
            loss_pct,
            price_per_tonne: config.price_per_tonne,
            target_loss_pct: config.target_loss_pct,
            harvests_per_year: 1,
        }
    }

    pub fn outcome(&self) -> SimulationOutcome {
        let (area, yield_per_ha, loss) = (self.area, self.expected_yield, self.loss_pct);

        SimulationOutcome {
            gross_tonnes: metrics::round2(area * yield_per_ha),
            tonnes_lost: metrics::loss_tonnage(area, yield_per_ha, loss),
            tonnes_harvested: metrics::harvested_tonnage(area, yield_per_ha, loss),
            financial_loss: metrics::financial_loss_from_inputs(area, yield_per_ha, loss, self.price_per_tonne),
            efficiency: metrics::efficiency(loss),
            tier: metrics::classify(loss),
            potential_savings: metrics::potential_savings(area, yield_per_ha, loss, self.target_loss_pct, self.price_per_tonne),
            annual_savings: metrics::projected_annual_savings(
                area,
                yield_per_ha,
                loss,
                self.target_loss_pct,
                self.price_per_tonne,
                self.harvests_per_year,
            ),
        }
    }
}

impl SimulationOutcome {
    pub fn rows(&self, simulation: &Simulation) -> Vec<(String, String)> {
        vec![
            ("Gross tonnage".to_string(), format!("{:.2} t", self.gross_tonnes)),
            ("Tonnes lost".to_string(), format!("{:.2} t", self.tonnes_lost)),
            ("Tonnes harvested".to_string(), format!("{:.2} t", self.tonnes_harvested)),
            ("Financial loss".to_string(), format_money(self.financial_loss)),
            ("Efficiency".to_string(), format_percent(self.efficiency)),
            ("Tier".to_string(), self.tier.to_string()),
            (
                format!("Savings at {} loss", format_percent(simulation.target_loss_pct)),
                format_money(self.potential_savings),
            ),
            (
                format!("Annual savings ({} harvest(s))", simulation.harvests_per_year),
                format_money(self.annual_savings),
            ),
        ]
    }
}

pub fn cmd(args: SimulateArgs) -> Result<()> {
    validation::check_positive(args.area, "area")?;
    validation::check_positive(args.expected_yield, "yield")?;
    validation::check_percentage(args.loss, "loss")?;
    if let Some(price) = args.price {
        validation::check_positive(price, "price")?;
    }
    if let Some(target) = args.target {
        validation::check_percentage(target, "target")?;
    }

    let config = Config::read()?.harvest_or_default();
    let simulation = Simulation {
        price_per_tonne: config.price_or_default(args.price),
        target_loss_pct: config.target_or_default(args.target),
        harvests_per_year: args.harvests_per_year,
        ..Simulation::new(args.area, args.expected_yield, args.loss, &config)
    };
    let outcome = simulation.outcome();

    let mut rows = outcome.rows(&simulation);
    if let Some(speed) = args.speed {
        validation::check_speed(speed)?;
        let hours = metrics::harvest_duration_hours(args.area, speed, args.cut_width);
        rows.push(("Estimated duration".to_string(), format!("{:.2} h", hours)));
    }

    msg_print!(Message::SimulationHeader, true);
    View::summary(&rows)?;

    if config.is_critical(args.loss) {
        msg_warning!(Message::LossCritical(args.loss, config.critical_loss_pct));
    } else if config.is_alert(args.loss) {
        msg_warning!(Message::LossAboveAlert(args.loss, config.alert_loss_pct));
    }

    Ok(())
}
