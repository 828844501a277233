use crate::infra::{build_lead_service, build_suite};
use clap::Args;
use flipfinder::config::AppConfig;
use flipfinder::error::AppError;
use flipfinder::leads::deal::DEFAULT_HOLDING_MONTHS;
use flipfinder::leads::{
    estimate_deal_economics, import_leads_from_path, BucketPolicy, LeadRecord, PropertyRecord,
    SystemClock,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV export using the lead storage column names
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only print the highest priority leads
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Seed the neighborhood sampling for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Bucket ceiling policy: advisory or enforced
    #[arg(long)]
    pub(crate) policy: Option<BucketPolicy>,
}

#[derive(Args, Debug)]
pub(crate) struct ArvArgs {
    /// Market area, e.g. "Grand Rapids"
    #[arg(long)]
    pub(crate) city: String,
    #[arg(long, default_value_t = 3)]
    pub(crate) beds: u8,
    #[arg(long, default_value_t = 2.0)]
    pub(crate) baths: f32,
    #[arg(long, default_value_t = 1500)]
    pub(crate) sqft: u32,
    #[arg(long, default_value_t = 1970)]
    pub(crate) year_built: u16,
    /// Seed the confidence draw for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct NeighborhoodArgs {
    #[arg(long)]
    pub(crate) city: String,
    /// Seed the sampled metrics for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct DealArgs {
    /// Negotiated purchase price
    #[arg(long, value_parser = parse_amount)]
    pub(crate) price: f64,
    /// After-repair value
    #[arg(long, value_parser = parse_amount)]
    pub(crate) arv: f64,
    /// Rehab budget
    #[arg(long, value_parser = parse_amount)]
    pub(crate) repairs: f64,
    /// Holding period in months, clamped to 1-12
    #[arg(long, default_value_t = DEFAULT_HOLDING_MONTHS)]
    pub(crate) months: u8,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        csv,
        top,
        seed,
        policy,
    } = args;

    let mut config = AppConfig::load()?;
    if seed.is_some() {
        config.scoring.seed = seed;
    }
    if let Some(policy) = policy {
        config.scoring.bucket_policy = policy;
    }

    let properties = import_leads_from_path(&csv)?;
    let service = build_lead_service(&config.scoring)?;
    for property in properties {
        service.submit(property)?;
    }

    let ranked = service.ranked(top)?;
    println!(
        "Lead priority report ({} leads, {} bucket policy)",
        service.summary()?.total_leads,
        config.scoring.bucket_policy
    );
    for (rank, record) in ranked.iter().enumerate() {
        render_lead(rank + 1, record);
    }

    Ok(())
}

pub(crate) fn run_arv(args: ArvArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if args.seed.is_some() {
        config.scoring.seed = args.seed;
    }

    let suite = build_suite(&config.scoring, Arc::new(SystemClock))?;
    let property = arv_subject(&args);
    let prediction = suite.predict_arv(&property);
    let adjustments = &prediction.adjustments;

    println!("ARV prediction for {}", prediction.city);
    println!(
        "- Predicted ARV ${:.0} (range ${:.0} - ${:.0}, confidence {}%)",
        prediction.predicted_arv,
        prediction.low_estimate,
        prediction.high_estimate,
        prediction.confidence
    );
    println!(
        "- ${:.0}/sqft | market appreciation {:.1}%",
        prediction.price_per_sqft, prediction.appreciation_rate
    );
    println!(
        "- Base ${:.0} | beds {:+.0} | baths {:+.0} | age x{:.2} | appreciation x{:.3}",
        adjustments.base_arv,
        adjustments.bed_adjustment,
        adjustments.bath_adjustment,
        adjustments.age_multiplier,
        adjustments.appreciation_factor
    );

    Ok(())
}

pub(crate) fn run_neighborhood(args: NeighborhoodArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if args.seed.is_some() {
        config.scoring.seed = args.seed;
    }

    let suite = build_suite(&config.scoring, Arc::new(SystemClock))?;
    let assessment = suite.analyze_neighborhood(&args.city);
    let metrics = &assessment.metrics;

    println!(
        "Neighborhood grade for {}: {} ({}/100)",
        assessment.city, assessment.grade, assessment.score
    );
    println!("- {}", assessment.outlook);
    println!(
        "- Schools {}/10 | safety {}/10 | walkability {} | job growth {:.1}% | population {}",
        metrics.school_rating,
        metrics.safety_rating,
        metrics.walkability,
        metrics.job_growth,
        metrics.population_trend.label()
    );
    println!(
        "- Median price ${} | appreciation {:.1}%",
        assessment.median_price, assessment.appreciation
    );

    Ok(())
}

pub(crate) fn run_deal(args: DealArgs) -> Result<(), AppError> {
    let deal = estimate_deal_economics(args.price, args.arv, args.repairs, args.months);

    println!("Deal analysis: {}", deal.verdict.label());
    println!(
        "- Purchase ${:.0} + repairs ${:.0} + holding ${:.0} ({} mo) + selling ${:.0}",
        args.price, args.repairs, deal.holding_costs, deal.holding_months, deal.selling_costs
    );
    println!(
        "- Total investment ${:.0} | net profit ${:.0} | ROI {:.1}%",
        deal.total_investment, deal.net_profit, deal.roi
    );
    println!("- Max offer at 70% rule: ${:.0}", deal.max_offer);

    Ok(())
}

pub(crate) fn render_lead(rank: usize, record: &LeadRecord) {
    let score = &record.score;
    println!(
        "\n{rank}. [{}] {} - {}, {} ({})",
        score.tier.label(),
        score.score,
        record.property.address,
        record.property.city,
        record.id()
    );
    println!("   {}", score.action);
    println!("   {}", score.recommendation.summary());
    println!(
        "   Max offer ${:.0} | repairs ${:.0} | ROI {:.1}% | stage {}",
        score.financials.max_offer,
        score.financials.estimated_repairs,
        score.financials.roi,
        record.stage.label()
    );
    if let Some(neighborhood) = record.neighborhood_score {
        println!("   Neighborhood score {neighborhood}/100");
    }
    for insight in &score.insights {
        println!("   - {insight}");
    }
}

fn arv_subject(args: &ArvArgs) -> PropertyRecord {
    PropertyRecord {
        city: args.city.clone(),
        beds: args.beds,
        baths: args.baths,
        sqft: args.sqft,
        year_built: args.year_built,
        ..PropertyRecord::default()
    }
}

/// Dollar amount; accepts `$` and thousands separators, rejects negatives.
pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let value = cleaned
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a dollar amount ({err})"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be a non-negative amount"));
    }
    Ok(value)
}
