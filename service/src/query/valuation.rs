//! [`Query`] for computing a [`Valuation`] of a [`Plot`].

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{outgoing::Derived, Plot, Valuation};
use crate::{
    domain::plot,
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// Computes a [`Valuation`] of a [`Plot`] without persisting anything.
///
/// Stale or missing [`Derived`] outgoing rows are substituted in memory only.
#[derive(Clone, Copy, Debug)]
pub struct ValuationOf {
    /// ID of the [`Plot`] to value.
    pub plot_id: plot::Id,
}

impl<Db> Query<ValuationOf> for Service<Db>
where
    Db: Database<
        Select<By<Option<read::plot::Graph>, plot::Id>>,
        Ok = Option<read::plot::Graph>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<read::plot::Valuated>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        ValuationOf { plot_id }: ValuationOf,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .database()
            .execute(Select(By::new(plot_id)))
            .await
            .map_err(tracerr::wrap!())?
            .map(read::plot::Graph::valuate))
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use crate::{
        domain::stored_value::Key, infra::database::mock::Mock, Config,
    };

    use super::*;

    #[tokio::test]
    async fn substitutes_derived_rows_without_writing() {
        let db = Mock::default();
        let plot_id = db.seed_plot(dec!(500), dec!(20));
        db.seed_stored_value(plot_id, Key::VacancyPercentage, dec!(5));
        let svc = Service::new(Config::from_secret(b"secret"), db.clone());

        let valuated = svc
            .execute(ValuationOf { plot_id })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(db.writes(), 0);
        assert!(db.outgoings(plot_id).is_empty());
        assert_eq!(valuated.graph.outgoings.len(), 3);
        assert_eq!(
            valuated.valuation.management_fee.amount(),
            dec!(114000),
        );
    }

    #[tokio::test]
    async fn returns_none_for_unknown_plot() {
        let svc =
            Service::new(Config::from_secret(b"secret"), Mock::default());

        let valuated = svc
            .execute(ValuationOf {
                plot_id: plot::Id::new(),
            })
            .await
            .unwrap();

        assert!(valuated.is_none());
    }
}
