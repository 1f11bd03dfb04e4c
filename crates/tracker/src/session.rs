use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, Utc};
use ledger::TripReport;
use model::{
    coordinate::Coordinate,
    driver::DriverProfile,
    fuel::FuelRecord,
    location::LocationSample,
    money::{Contribution, Expense, FUEL_CATEGORY},
    route_plan::{RoutePlan, Stop},
    trip::TripData,
    Validate, WithDistance,
};
use route::RouteSummary;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use utility::{id::Id, math::sequence_number};

use crate::{store::TripStore, Result, TrackerError};

/// The trip document of one running application together with the store it
/// is persisted to.
///
/// Every mutation works on a copy of the document which only replaces the
/// current one after it was saved, so a failing store never leaves memory and
/// storage out of step.
pub struct Session<S: TripStore> {
    trip: RwLock<TripData>,
    store: S,
    last_id: AtomicU64,
}

impl<S: TripStore> Session<S> {
    /// Loads the stored document, or starts with an empty one if the store has
    /// none yet.
    pub async fn open(store: S) -> Result<Self> {
        let trip = match store.load().await? {
            Some(trip) => {
                log::info!(
                    "loaded trip with {} stops, {} expenses and {} location samples",
                    trip.stops.len(),
                    trip.expenses.len(),
                    trip.location_history.len()
                );
                trip
            }
            None => {
                log::info!("no stored trip, starting empty");
                TripData::default()
            }
        };
        Ok(Self {
            last_id: AtomicU64::new(highest_id(&trip)),
            trip: RwLock::new(trip),
            store,
        })
    }

    /// Record ids are creation times in milliseconds, bumped where needed so
    /// they stay unique. Fails once an imported id sits at `u64::MAX`.
    fn next_id(&self) -> Result<u64> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let mut last = self.last_id.load(Ordering::Relaxed);
        loop {
            let next = last
                .checked_add(1)
                .ok_or(TrackerError::IdsExhausted)?
                .max(now);
            match self.last_id.compare_exchange_weak(
                last,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(next),
                Err(actual) => last = actual,
            }
        }
    }

    async fn mutate<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut TripData) -> Result<R>,
    {
        let mut trip = self.trip.write().await;
        let mut updated = trip.clone();
        let result = f(&mut updated)?;
        if let Err(why) = self.store.save(&updated).await {
            log::error!("could not save trip: {}", why);
            return Err(why.into());
        }
        *trip = updated;
        Ok(result)
    }

    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&TripData) -> R,
    {
        f(&*self.trip.read().await)
    }

    pub async fn snapshot(&self) -> TripData {
        self.trip.read().await.clone()
    }

    /// Replaces the whole document.
    pub async fn import(&self, trip: TripData) -> Result<()> {
        trip.validate()?;
        self.last_id.fetch_max(highest_id(&trip), Ordering::Relaxed);
        self.mutate(|current| {
            *current = trip;
            Ok(())
        })
        .await?;
        log::info!("imported trip document");
        Ok(())
    }

    /// Replaces the driver profile. An already uploaded image is kept when
    /// the new profile does not carry one.
    pub async fn set_driver(&self, mut driver: DriverProfile) -> Result<DriverProfile> {
        driver.validate()?;
        self.mutate(|trip| {
            if driver.image_url.is_none() {
                driver.image_url = trip.driver.image_url.take();
                driver.image_public_id = trip.driver.image_public_id.take();
            }
            trip.driver = driver.clone();
            Ok(driver)
        })
        .await
    }

    pub async fn set_route(&self, route: RoutePlan) -> Result<RoutePlan> {
        route.validate()?;
        self.mutate(|trip| {
            trip.route = route.clone();
            Ok(route)
        })
        .await
    }

    /// Replaces the member list. Names are trimmed, blank and repeated names
    /// dropped.
    pub async fn set_family_members(&self, members: Vec<String>) -> Result<Vec<String>> {
        let mut unique: Vec<String> = Vec::with_capacity(members.len());
        for member in members {
            let member = member.trim();
            if !member.is_empty() && !unique.iter().any(|known| known == member) {
                unique.push(member.to_owned());
            }
        }
        self.mutate(|trip| {
            trip.family_members = unique.clone();
            Ok(unique)
        })
        .await
    }

    /// Adds a refill. Like filling the tank by hand, this also books the cost
    /// as a fuel expense paid by the driver and adds the liters to the fuel
    /// available.
    pub async fn add_fuel_record(&self, mut record: FuelRecord) -> Result<FuelRecord> {
        record.validate()?;
        record.id = Id::new(self.next_id()?);
        let expense_id = Id::new(self.next_id()?);
        self.mutate(|trip| {
            trip.expenses.push(Expense {
                id: expense_id,
                category: FUEL_CATEGORY.to_owned(),
                amount: record.cost,
                date: record.occurred_at.with_timezone(&Local).date_naive(),
                paid_by: trip.driver.display_name().to_owned(),
                description: Some(format!(
                    "Diesel refill - {}L at {}km",
                    record.liters.normalize(),
                    record.odometer_km.normalize()
                )),
            });
            let available = trip.driver.diesel_available.unwrap_or(Decimal::ZERO);
            trip.driver.diesel_available = Some(available + record.liters);
            trip.diesel_records.push(record.clone());
            Ok(record)
        })
        .await
    }

    pub async fn add_contribution(&self, mut contribution: Contribution) -> Result<Contribution> {
        contribution.validate()?;
        contribution.id = Id::new(self.next_id()?);
        self.mutate(|trip| {
            trip.contributions.push(contribution.clone());
            Ok(contribution)
        })
        .await
    }

    pub async fn add_expense(&self, mut expense: Expense) -> Result<Expense> {
        expense.validate()?;
        expense.id = Id::new(self.next_id()?);
        self.mutate(|trip| {
            trip.expenses.push(expense.clone());
            Ok(expense)
        })
        .await
    }

    pub async fn add_stop(&self, mut stop: Stop) -> Result<Stop> {
        stop.validate()?;
        stop.id = Id::new(self.next_id()?);
        self.mutate(|trip| {
            trip.stops.push(stop.clone());
            Ok(stop)
        })
        .await
    }

    /// Appends a GPS fix to the location history and returns it with its
    /// distance from the previous fix.
    pub async fn record_location(
        &self,
        coordinate: Coordinate,
        timestamp: DateTime<Utc>,
        accuracy_m: Option<f64>,
    ) -> Result<WithDistance<LocationSample>> {
        coordinate.validate()?;
        self.mutate(|trip| {
            let previous = trip.location_history.last();
            if previous.is_some_and(|previous| previous.timestamp > timestamp) {
                return Err(TrackerError::OutOfOrder);
            }
            let distance = previous
                .map(|previous| previous.coordinate.distance_km(&coordinate))
                .unwrap_or(0.0);
            let sample = LocationSample {
                coordinate,
                timestamp,
                sequence_index: sequence_number(trip.location_history.len()),
                accuracy_m,
            };
            trip.location_history.push(sample.clone());
            Ok(WithDistance::new(distance, sample))
        })
        .await
    }

    pub async fn remove_fuel_record(&self, id: Id<FuelRecord>) -> Result<FuelRecord> {
        self.mutate(|trip| {
            remove_by(&mut trip.diesel_records, "fuel record", id.raw(), |r| r.id == id)
        })
        .await
    }

    pub async fn remove_contribution(&self, id: Id<Contribution>) -> Result<Contribution> {
        self.mutate(|trip| {
            remove_by(&mut trip.contributions, "contribution", id.raw(), |c| c.id == id)
        })
        .await
    }

    pub async fn remove_expense(&self, id: Id<Expense>) -> Result<Expense> {
        self.mutate(|trip| {
            remove_by(&mut trip.expenses, "expense", id.raw(), |e| e.id == id)
        })
        .await
    }

    pub async fn remove_stop(&self, id: Id<Stop>) -> Result<Stop> {
        self.mutate(|trip| remove_by(&mut trip.stops, "stop", id.raw(), |s| s.id == id))
            .await
    }

    pub async fn route_summary(&self) -> RouteSummary {
        self.read(|trip| route::summarize(&trip.waypoints())).await
    }

    pub async fn report(&self) -> TripReport {
        self.read(|trip| TripReport::generate(trip, Utc::now())).await
    }
}

fn remove_by<T, F>(records: &mut Vec<T>, kind: &'static str, id: u64, matches: F) -> Result<T>
where
    F: Fn(&T) -> bool,
{
    records
        .iter()
        .position(matches)
        .map(|index| records.remove(index))
        .ok_or(TrackerError::NotFound { kind, id })
}

fn highest_id(trip: &TripData) -> u64 {
    trip.diesel_records
        .iter()
        .map(|r| r.id.raw())
        .chain(trip.contributions.iter().map(|c| c.id.raw()))
        .chain(trip.expenses.iter().map(|e| e.id.raw()))
        .chain(trip.stops.iter().map(|s| s.id.raw()))
        .max()
        .unwrap_or_default()
}
