use crate::{
    db::harvests::Harvests,
    libs::{
        config::Config,
        formatter::{format_money, format_percent},
        error::HarvestResult,
        harvest::{CaneVariety, HarvestRecord, HarvestUpdate, HarvesterBrand, NewHarvest, Weather},
        messages::Message,
        metrics::LossTier,
        validation,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MirrorArgs {
    /// SQLite database file [default: application data directory]
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: MirrorCommand,
}

#[derive(Debug, Subcommand)]
enum MirrorCommand {
    #[command(about = "Store a new harvest")]
    Add(AddArgs),
    #[command(about = "List stored harvests, newest first")]
    List {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    #[command(about = "Show one stored harvest")]
    Show { id: u32 },
    #[command(about = "Find harvests whose farm name contains the text")]
    Farm { name: String },
    #[command(about = "List harvests in a loss tier")]
    Tier { tier: LossTier },
    #[command(about = "Edit notes, loss or speed of a stored harvest")]
    Update(UpdateArgs),
    #[command(about = "Delete a stored harvest")]
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    #[command(about = "Show aggregate statistics")]
    Stats,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long, value_parser = parse_farm)]
    farm: String,
    #[arg(long, value_parser = parse_area)]
    area: f64,
    #[arg(long)]
    variety: CaneVariety,
    #[arg(long = "yield", value_parser = parse_yield)]
    expected_yield: f64,
    #[arg(long, value_parser = parse_loss)]
    loss: f64,
    #[arg(long, value_parser = parse_price)]
    price: Option<f64>,
    #[arg(long)]
    harvester: HarvesterBrand,
    #[arg(long, value_parser = validation::parse_speed)]
    speed: f64,
    #[arg(long)]
    weather: Weather,
    /// today, YYYY-MM-DD or DD/MM/YYYY [default: today]
    #[arg(long, value_parser = validation::parse_date)]
    date: Option<NaiveDate>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: u32,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long, value_parser = parse_loss)]
    loss: Option<f64>,
    #[arg(long, value_parser = validation::parse_speed)]
    speed: Option<f64>,
}

pub fn cmd(args: MirrorArgs) -> Result<()> {
    let mut harvests = match &args.db {
        Some(path) => Harvests::open(path)?,
        None => Harvests::new()?,
    };

    match args.command {
        MirrorCommand::Add(add) => {
            let config = Config::read()?.harvest_or_default();
            let mut new = NewHarvest::new()
                .farm(add.farm)
                .area(add.area)
                .variety(add.variety)
                .expected_yield(add.expected_yield)
                .loss(add.loss)
                .harvester(add.harvester)
                .speed(add.speed)
                .weather(add.weather);
            new.price_per_tonne = add.price;
            new.harvest_date = add.date;
            new.notes = add.notes;

            let id = harvests.insert_new(new, &config)?;
            msg_success!(Message::MirrorInserted(id));
            if config.is_alert(add.loss) {
                msg_warning!(Message::LossAboveAlert(add.loss, config.alert_loss_pct));
            }
        }
        MirrorCommand::List { limit } => print_records(&harvests.list(limit)?)?,
        MirrorCommand::Show { id } => match harvests.get_by_id(id)? {
            Some(record) => View::harvest(&record)?,
            None => msg_error!(Message::MirrorNotFound(id)),
        },
        MirrorCommand::Farm { name } => print_records(&harvests.by_farm(&name)?)?,
        MirrorCommand::Tier { tier } => print_records(&harvests.by_tier(tier)?)?,
        MirrorCommand::Update(update_args) => {
            let update = HarvestUpdate {
                notes: update_args.notes,
                loss_pct: update_args.loss,
                speed_kmh: update_args.speed,
            };
            if update.is_empty() {
                msg_info!(Message::NoFieldsToUpdate);
            } else if harvests.update(update_args.id, &update)? {
                msg_success!(Message::MirrorUpdated(update_args.id));
            } else {
                msg_error!(Message::MirrorNotFound(update_args.id));
            }
        }
        MirrorCommand::Delete { id, yes } => {
            let Some(record) = harvests.get_by_id(id)? else {
                msg_error!(Message::MirrorNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmRemoveHarvest(id, record.farm).to_string())
                    .default(false)
                    .interact()?;

            if !confirmed {
                msg_info!(Message::OperationCancelled);
            } else if harvests.delete(id)? {
                msg_success!(Message::MirrorDeleted(id));
            }
        }
        MirrorCommand::Stats => {
            let stats = harvests.statistics()?;
            msg_print!(Message::MirrorStatisticsHeader, true);
            View::summary(&[
                ("Harvests".to_string(), stats.count.to_string()),
                ("Total area".to_string(), format!("{:.2} ha", stats.total_area)),
                ("Mean loss".to_string(), format_percent(stats.mean_loss_pct)),
                ("Lowest loss".to_string(), format_percent(stats.min_loss_pct)),
                ("Highest loss".to_string(), format_percent(stats.max_loss_pct)),
                ("Total tonnes lost".to_string(), format!("{:.2} t", stats.total_tonnes_lost)),
                ("Total financial loss".to_string(), format_money(stats.total_financial_loss)),
            ])?;
        }
    }

    Ok(())
}

fn print_records(records: &[HarvestRecord]) -> Result<()> {
    if records.is_empty() {
        msg_info!(Message::MirrorNoResults);
        return Ok(());
    }

    msg_print!(Message::HarvestsHeader(records.len()));
    View::harvests(records)
}

fn parse_farm(input: &str) -> HarvestResult<String> {
    validation::non_empty(input, "farm")
}

fn parse_area(input: &str) -> HarvestResult<f64> {
    validation::parse_positive(input, "area")
}

fn parse_yield(input: &str) -> HarvestResult<f64> {
    validation::parse_positive(input, "yield")
}

fn parse_price(input: &str) -> HarvestResult<f64> {
    validation::parse_positive(input, "price")
}

fn parse_loss(input: &str) -> HarvestResult<f64> {
    validation::parse_percentage(input, "loss")
}
