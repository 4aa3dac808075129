use common::WorkshopStatus;
use sea_orm::*;
use tracing::info;

use crate::entity::{provider, workshop};

/// Name of the provider owning the sample workshops.
pub const DEFAULT_PROVIDER: &str = "Mergington High";

/// A workshop inserted into an empty database.
pub struct SampleWorkshop {
    pub title: &'static str,
    pub description: &'static str,
    pub schedule: &'static str,
    pub max_participants: i32,
}

/// Sample workshops seeded on an empty database. All are published.
pub const SAMPLE_WORKSHOPS: &[SampleWorkshop] = &[
    SampleWorkshop {
        title: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
    },
    SampleWorkshop {
        title: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
    },
];

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub provider_created: bool,
    pub workshops_inserted: usize,
}

/// Seed the default provider and the sample workshops.
///
/// Each table is only touched when it has no rows at all, so the sample
/// workshops are not re-attached to a provider created after the original
/// one was deleted.
pub async fn seed_sample_data<C: ConnectionTrait>(db: &C) -> Result<SeedReport, DbErr> {
    let mut report = SeedReport::default();

    let provider = match provider::Entity::find()
        .order_by_asc(provider::Column::Id)
        .one(db)
        .await?
    {
        Some(existing) => existing,
        None => {
            let model = provider::ActiveModel {
                name: Set(DEFAULT_PROVIDER.to_string()),
                public: Set(true),
                ..Default::default()
            }
            .insert(db)
            .await?;
            report.provider_created = true;
            info!(provider_id = model.id, "Seeded default provider");
            model
        }
    };

    let has_workshops = workshop::Entity::find().one(db).await?.is_some();
    if !has_workshops {
        let models = SAMPLE_WORKSHOPS.iter().map(|w| workshop::ActiveModel {
            title: Set(w.title.to_string()),
            description: Set(Some(w.description.to_string())),
            schedule: Set(Some(w.schedule.to_string())),
            max_participants: Set(Some(w.max_participants)),
            status: Set(WorkshopStatus::Published),
            provider_id: Set(Some(provider.id)),
            ..Default::default()
        });

        workshop::Entity::insert_many(models).exec(db).await?;
        report.workshops_inserted = SAMPLE_WORKSHOPS.len();
        info!("Seeded {} sample workshops", report.workshops_inserted);
    }

    Ok(report)
}
