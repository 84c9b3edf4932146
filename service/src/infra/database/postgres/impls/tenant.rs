//! [`Tenant`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{plot, PropertyType, Tenant},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Tenant>, plot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Tenant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Tenant>, plot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let plot_id: plot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT t.id, t.plot_id, t.name, \
                   t.area_per_client, t.area_per_market, \
                   t.rate_per_client, t.rate_per_market, \
                   t.gross_monthly_rental, \
                   t.start_date, t.end_date, \
                   pt.id AS property_type_id, \
                   pt.identifier AS property_type_identifier \
            FROM tenants AS t \
            INNER JOIN property_types AS pt \
                    ON pt.id = t.property_type_id \
            WHERE t.plot_id = $1::UUID \
            ORDER BY t.seq ASC";
        Ok(self
            .query(SQL, &[&plot_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Tenant {
                id: row.get("id"),
                plot_id: row.get("plot_id"),
                name: row.get("name"),
                area_per_client: row.get("area_per_client"),
                area_per_market: row.get("area_per_market"),
                rate_per_client: row.get("rate_per_client"),
                rate_per_market: row.get("rate_per_market"),
                gross_monthly_rental: row.get("gross_monthly_rental"),
                property_type: PropertyType {
                    id: row.get("property_type_id"),
                    identifier: row.get("property_type_identifier"),
                },
                start_date: row.get("start_date"),
                end_date: row.get("end_date"),
            })
            .collect())
    }
}
