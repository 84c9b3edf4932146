//! [`Query`] collection related to a single [`Plot`].

use common::operations::By;

use crate::{
    domain::{plot, Plot},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Plot`] by its [`plot::Id`].
pub type ById = DatabaseQuery<By<Option<Plot>, plot::Id>>;

/// Queries a [`read::plot::Graph`] by its [`plot::Id`].
pub type Graph = DatabaseQuery<By<Option<read::plot::Graph>, plot::Id>>;

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use crate::{infra::database::mock::Mock, Config, Query as _, Service};

    use super::*;

    #[tokio::test]
    async fn selects_plot_and_its_graph() {
        let db = Mock::default();
        let plot_id = db.seed_plot(dec!(500), dec!(20));
        let svc = Service::new(Config::from_secret(b"secret"), db);

        let plot = svc.execute(ById::by(plot_id)).await.unwrap().unwrap();
        let graph = svc.execute(Graph::by(plot_id)).await.unwrap().unwrap();

        assert_eq!(plot.id, plot_id);
        assert_eq!(graph.plot.id, plot_id);
        assert_eq!(graph.tenants.len(), 1);
        assert!(graph.outgoings.is_empty());
    }

    #[tokio::test]
    async fn returns_none_for_unknown_plot() {
        let svc =
            Service::new(Config::from_secret(b"secret"), Mock::default());

        let plot = svc.execute(ById::by(plot::Id::new())).await.unwrap();

        assert!(plot.is_none());
    }
}
