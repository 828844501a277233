use crate::infra::{build_lead_service, random_source};
use crate::report::render_lead;
use clap::Args;
use flipfinder::config::AppConfig;
use flipfinder::error::AppError;
use flipfinder::leads::{
    generate_demo_leads, DemoLead, LeadRepository, LeadService, PipelineSummary, RandomSource,
};

const DEFAULT_DEMO_SEED: u64 = 2026;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of synthetic leads to generate
    #[arg(long, default_value_t = 25)]
    pub(crate) count: usize,
    /// Seed for lead generation and valuation draws (defaults to a fixed seed)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// How many of the highest priority leads to print in full
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
}

/// Generates `count` leads across the service's market catalog and files each
/// under its sampled pipeline stage.
pub(crate) fn seed_demo_leads<R>(
    service: &LeadService<R>,
    count: usize,
    random: &dyn RandomSource,
) -> Result<usize, AppError>
where
    R: LeadRepository + 'static,
{
    let leads = generate_demo_leads(count, random, service.suite().catalog());
    for DemoLead { property, stage } in leads {
        service.submit_in_stage(property, stage)?;
    }
    Ok(count)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { count, seed, top } = args;

    let mut config = AppConfig::load()?;
    let seed = seed.or(config.scoring.seed).unwrap_or(DEFAULT_DEMO_SEED);
    config.scoring.seed = Some(seed);

    println!("FlipFinder pipeline demo (seed {seed})");
    let service = build_lead_service(&config.scoring)?;
    let random = random_source(Some(seed));
    seed_demo_leads(&service, count, random.as_ref())?;

    let summary = service.summary()?;
    render_summary(&summary);

    let ranked = service.ranked(Some(top))?;
    if !ranked.is_empty() {
        println!("\nTop {} leads", ranked.len());
    }
    for (rank, record) in ranked.iter().enumerate() {
        render_lead(rank + 1, record);
    }

    Ok(())
}

fn render_summary(summary: &PipelineSummary) {
    println!(
        "- {} leads | {} hot | ${} pipeline value",
        summary.total_leads, summary.hot_leads, summary.pipeline_value
    );
    println!(
        "- Average score {:.1} | average ROI {:.1}%",
        summary.average_score, summary.average_roi
    );

    println!("Priority tiers:");
    for entry in &summary.tiers {
        println!("  - {}: {}", entry.tier.label(), entry.count);
    }

    println!("Pipeline stages:");
    for entry in summary.stages.iter().filter(|entry| entry.count > 0) {
        println!("  - {}: {}", entry.label, entry.count);
    }

    if !summary.top_cities.is_empty() {
        println!("Top markets:");
        for entry in &summary.top_cities {
            println!("  - {}: {}", entry.city, entry.count);
        }
    }
}
