//! Typed per-entity stores over the hosted PostgreSQL backend.
//!
//! One narrow store per collection with insert/fetch/update/delete, instead
//! of a generic any-record gateway. Calls are unary, non-transactional, and
//! carry no retry or idempotency semantics.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::models::{
    DailyPatch, DayCampDaily, DayCampPackage, DogSize, KennelSuite, NewDaily, NewPackage,
    NewSuite, PackagePatch, SuitePatch,
};

fn size_labels(sizes: &[DogSize]) -> Vec<String> {
    sizes.iter().map(|s| s.as_str().to_string()).collect()
}

/// Store for the `kennel_suites` collection.
#[derive(Clone)]
pub struct SuiteStore {
    pool: PgPool,
}

impl SuiteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewSuite) -> Result<KennelSuite> {
        let suite = sqlx::query_as::<_, KennelSuite>(
            r#"
            INSERT INTO kennel_suites (
                id, ctr_name, district_manager, full_address,
                suite_name, dog_sizes, price_per_night, price_additional_dog,
                num_kennels, features, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, ctr_name, district_manager, full_address,
                suite_name, dog_sizes, price_per_night, price_additional_dog,
                num_kennels, features, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.ctr_name)
        .bind(&new.district_manager)
        .bind(&new.full_address)
        .bind(&new.suite_name)
        .bind(size_labels(&new.dog_sizes))
        .bind(new.price_per_night)
        .bind(new.price_additional_dog)
        .bind(new.num_kennels)
        .bind(&new.features)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(suite)
    }

    pub async fn fetch_for_center(&self, ctr_name: &str) -> Result<Vec<KennelSuite>> {
        let suites = sqlx::query_as::<_, KennelSuite>(
            r#"
            SELECT
                id, ctr_name, district_manager, full_address,
                suite_name, dog_sizes, price_per_night, price_additional_dog,
                num_kennels, features, created_at, updated_at
            FROM kennel_suites
            WHERE ctr_name = $1
            ORDER BY created_at
            "#,
        )
        .bind(ctr_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(suites)
    }

    pub async fn update(&self, id: Uuid, patch: SuitePatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE kennel_suites
            SET suite_name = $2,
                dog_sizes = $3,
                price_per_night = $4,
                price_additional_dog = $5,
                num_kennels = $6,
                features = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.suite_name)
        .bind(size_labels(&patch.dog_sizes))
        .bind(patch.price_per_night)
        .bind(patch.price_additional_dog)
        .bind(patch.num_kennels)
        .bind(&patch.features)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM kennel_suites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Store for the `daycamp_daily` collection.
///
/// Fetch orders newest-first; the first row is the logically current rates
/// record for the center.
#[derive(Clone)]
pub struct DailyStore {
    pool: PgPool,
}

impl DailyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewDaily) -> Result<DayCampDaily> {
        let daily = sqlx::query_as::<_, DayCampDaily>(
            r#"
            INSERT INTO daycamp_daily (
                id, ctr_name, district_manager, full_address,
                dropin, halfday, weekend, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, ctr_name, district_manager, full_address,
                dropin, halfday, weekend, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.ctr_name)
        .bind(&new.district_manager)
        .bind(&new.full_address)
        .bind(new.dropin)
        .bind(new.halfday)
        .bind(new.weekend)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(daily)
    }

    pub async fn fetch_for_center(&self, ctr_name: &str) -> Result<Vec<DayCampDaily>> {
        let rows = sqlx::query_as::<_, DayCampDaily>(
            r#"
            SELECT
                id, ctr_name, district_manager, full_address,
                dropin, halfday, weekend, created_at, updated_at
            FROM daycamp_daily
            WHERE ctr_name = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(ctr_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update(&self, id: Uuid, patch: DailyPatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE daycamp_daily
            SET dropin = $2, halfday = $3, weekend = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.dropin)
        .bind(patch.halfday)
        .bind(patch.weekend)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM daycamp_daily WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Store for the `daycamp_packages` collection.
#[derive(Clone)]
pub struct PackageStore {
    pool: PgPool,
}

impl PackageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewPackage) -> Result<DayCampPackage> {
        let package = sqlx::query_as::<_, DayCampPackage>(
            r#"
            INSERT INTO daycamp_packages (
                id, ctr_name, district_manager, full_address,
                days, price, expiration, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, ctr_name, district_manager, full_address,
                days, price, expiration, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.ctr_name)
        .bind(&new.district_manager)
        .bind(&new.full_address)
        .bind(new.days)
        .bind(new.price)
        .bind(&new.expiration)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(package)
    }

    pub async fn fetch_for_center(&self, ctr_name: &str) -> Result<Vec<DayCampPackage>> {
        let rows = sqlx::query_as::<_, DayCampPackage>(
            r#"
            SELECT
                id, ctr_name, district_manager, full_address,
                days, price, expiration, created_at, updated_at
            FROM daycamp_packages
            WHERE ctr_name = $1
            ORDER BY created_at
            "#,
        )
        .bind(ctr_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update(&self, id: Uuid, patch: PackagePatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE daycamp_packages
            SET days = $2, price = $3, expiration = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.days)
        .bind(patch.price)
        .bind(&patch.expiration)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM daycamp_packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_suite(ctr_name: &str, suite_name: &str) -> NewSuite {
        NewSuite {
            ctr_name: ctr_name.to_string(),
            district_manager: "Pat Jones".to_string(),
            full_address: "123 Main St".to_string(),
            suite_name: suite_name.to_string(),
            dog_sizes: vec![DogSize::Small],
            price_per_night: dec!(45.00),
            price_additional_dog: dec!(20.00),
            num_kennels: 4,
            features: vec!["webcam".to_string()],
        }
    }

    // Needs DATABASE_URL pointing at a migrated database:
    //   cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn delete_removes_only_the_target_row() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL for store tests");
        let pool = PgPool::connect(&url).await.expect("connect");
        let store = SuiteStore::new(pool);

        // Fresh center name per run so reruns never collide on the
        // per-center unique suite index.
        let ctr = format!("store-test-{}", Uuid::new_v4());
        let kept = store.insert(new_suite(&ctr, "Keep")).await.unwrap();
        let removed = store.insert(new_suite(&ctr, "Remove")).await.unwrap();

        store.delete(removed.id).await.unwrap();

        let remaining = store.fetch_for_center(&ctr).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);

        // A second delete of the same id hits zero rows.
        assert!(matches!(
            store.delete(removed.id).await,
            Err(AppError::NotFound)
        ));

        store.delete(kept.id).await.unwrap();
        assert!(store.fetch_for_center(&ctr).await.unwrap().is_empty());
    }
}
