use super::common::*;
use crate::leads::domain::{PipelineStage, PropertyId, PropertyRecord};
use crate::leads::repository::{LeadRepository, RepositoryError};
use crate::leads::scoring::PriorityTier;
use crate::leads::service::LeadServiceError;

#[test]
fn submit_scores_and_stores_new_lead() {
    let (service, repository) = build_service();

    let record = service.submit(hot_lead()).expect("lead stored");

    assert_eq!(record.stage, PipelineStage::NewLead);
    assert_eq!(record.score.tier, PriorityTier::Hot);
    assert_eq!(record.neighborhood_score, Some(58));
    assert_eq!(record.created_at, record.updated_at);

    let stored = repository
        .fetch(&PropertyId("hot-1".to_string()))
        .expect("fetch")
        .expect("record present");
    assert_eq!(stored, record);
}

#[test]
fn submit_assigns_ids_to_blank_leads() {
    let (service, _) = build_service();
    let property = PropertyRecord {
        id: PropertyId("  ".to_string()),
        ..clean_lead()
    };

    let record = service.submit(property).expect("lead stored");
    assert!(record.id().as_str().starts_with("lead-"));
}

#[test]
fn duplicate_submission_surfaces_conflict() {
    let (service, _) = build_service();
    service.submit(hot_lead()).expect("first insert");

    match service.submit(hot_lead()) {
        Err(LeadServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn ranked_orders_by_score_then_id() {
    let (service, _) = build_service();
    service.submit(clean_lead()).expect("clean");
    service.submit(hot_lead()).expect("hot");
    service.submit(lead_with("b-deal", "Flint", 40_000)).expect("b");
    service.submit(lead_with("a-deal", "Flint", 40_000)).expect("a");

    let ranked = service.ranked(None).expect("ranked");
    let ids: Vec<&str> = ranked.iter().map(|record| record.id().as_str()).collect();
    assert_eq!(ids, vec!["hot-1", "a-deal", "b-deal", "clean-1"]);

    let top = service.ranked(Some(2)).expect("ranked");
    assert_eq!(top.len(), 2);
}

#[test]
fn advance_stage_updates_record() {
    let (service, repository) = build_service();
    service.submit(hot_lead()).expect("stored");
    let id = PropertyId("hot-1".to_string());

    let updated = service
        .advance_stage(&id, PipelineStage::Contacted)
        .expect("stage updated");

    assert_eq!(updated.stage, PipelineStage::Contacted);
    let stored = repository.fetch(&id).expect("fetch").expect("present");
    assert_eq!(stored.stage, PipelineStage::Contacted);
}

#[test]
fn missing_lead_reports_not_found() {
    let (service, _) = build_service();
    let id = PropertyId("ghost".to_string());

    assert!(matches!(
        service.get(&id),
        Err(LeadServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.advance_stage(&id, PipelineStage::Closed),
        Err(LeadServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.rescore(&id),
        Err(LeadServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn rescore_keeps_stage() {
    let (service, _) = build_service();
    service.submit(hot_lead()).expect("stored");
    let id = PropertyId("hot-1".to_string());
    service
        .advance_stage(&id, PipelineStage::Qualified)
        .expect("stage");

    let rescored = service.rescore(&id).expect("rescored");
    assert_eq!(rescored.stage, PipelineStage::Qualified);
    assert_eq!(rescored.score.score, 100);
}

#[test]
fn rescore_racing_a_stage_change_keeps_the_new_stage() {
    let (service, repository) = build_service();
    service.submit(hot_lead()).expect("stored");
    let id = PropertyId("hot-1".to_string());

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..200 {
                service.rescore(&id).expect("rescored");
            }
        });
        scope.spawn(|| {
            service
                .advance_stage(&id, PipelineStage::OfferMade)
                .expect("stage");
        });
    });

    let stored = repository.fetch(&id).expect("fetch").expect("present");
    assert_eq!(stored.stage, PipelineStage::OfferMade);
    assert_eq!(stored.score.score, 100);
}

#[test]
fn summary_rolls_up_tiers_stages_and_cities() {
    let (service, _) = build_service();
    service.submit(hot_lead()).expect("hot");
    service.submit(clean_lead()).expect("clean");
    service.submit(lead_with("f-1", "Flint", 40_000)).expect("f1");
    service.submit(lead_with("f-2", "Flint", 140_000)).expect("f2");

    let summary = service.summary().expect("summary");

    assert_eq!(summary.total_leads, 4);
    assert_eq!(summary.hot_leads, 1);
    assert_eq!(summary.pipeline_value, 55_000 + 100_000 + 40_000 + 140_000);
    assert_eq!(summary.tiers.len(), 4);
    assert_eq!(summary.tiers[0].tier, PriorityTier::Hot);
    assert_eq!(summary.stages[0].count, 4);
    assert_eq!(summary.top_cities[0].city, "Flint");
    assert_eq!(summary.top_cities[0].count, 2);
}

#[test]
fn repository_outage_propagates() {
    let service = service_with(UnavailableRepository);

    match service.submit(hot_lead()) {
        Err(LeadServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline")
        }
        other => panic!("expected outage, got {other:?}"),
    }
    assert!(service.summary().is_err());
}
