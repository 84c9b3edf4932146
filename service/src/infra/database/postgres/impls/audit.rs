//! [`audit::Event`]-related [`Database`] implementations.

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::audit,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<audit::Event>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(event): Insert<audit::Event>,
    ) -> Result<Self::Ok, Self::Err> {
        let audit::Event {
            id,
            user_id,
            domain,
            action,
            record_id,
            record_data,
            created_at,
        } = event;

        const SQL: &str = "\
            INSERT INTO audit_events (\
                id, user_id, domain, action, \
                record_id, record_data, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::INT2, $4::INT2, \
                $5::UUID, $6::JSONB, \
                $7::TIMESTAMPTZ \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &domain,
                &action,
                &record_id,
                &record_data,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
