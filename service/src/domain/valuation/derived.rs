//! Reconciliation of the system-maintained [`Outgoing`] rows.
//!
//! The [`Derived`] rows of a [`Plot`] mirror its computed figures. Their
//! `unit_per_client` is never edited by users: it's recomputed on every
//! valuation and written back whenever it drifts.

use common::Money;
use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::Plot;
use crate::domain::{
    outgoing::{self, Derived, ItemType},
    plot, Outgoing,
};

/// Computed figures the [`Derived`] rows must reflect.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Computed {
    /// Value of the [`Derived::ManagementFee`] row.
    pub management_fee: Money,

    /// Value of the [`Derived::MaintenanceAndRepairs`] and
    /// [`Derived::Insurance`] rows.
    pub insurance_total: Decimal,
}

impl Computed {
    /// Returns the value the provided [`Derived`] row must hold.
    #[must_use]
    pub fn value_of(&self, derived: Derived) -> Decimal {
        match derived {
            Derived::ManagementFee => self.management_fee.amount(),
            Derived::MaintenanceAndRepairs | Derived::Insurance => {
                self.insurance_total
            }
        }
    }
}

/// Write required to bring a [`Derived`] row in sync.
#[derive(Clone, Debug, PartialEq)]
pub enum Upsert {
    /// The row is missing and must be created.
    Create(Outgoing),

    /// The row holds a stale value and must be updated.
    Update {
        /// The row as persisted.
        before: Outgoing,

        /// The row to persist.
        after: Outgoing,
    },
}

impl Upsert {
    /// Returns the [`Outgoing`] row to persist.
    #[must_use]
    pub fn outgoing(&self) -> &Outgoing {
        match self {
            Self::Create(o) | Self::Update { after: o, .. } => o,
        }
    }
}

/// Computes the writes bringing the [`Derived`] rows among the provided
/// `outgoings` in sync with the `computed` figures.
///
/// If several rows share a [`Derived`] identifier, only the first one is
/// maintained. Rows already in sync produce no [`Upsert`], so reconciling
/// twice in a row (with the first result applied) yields nothing the second
/// time.
#[must_use]
pub fn reconcile(
    plot_id: plot::Id,
    outgoings: &[Outgoing],
    computed: &Computed,
) -> Vec<Upsert> {
    Derived::ALL
        .into_iter()
        .filter_map(|derived| {
            let value = computed.value_of(derived);
            match outgoings.iter().find(|o| o.derived() == Some(derived)) {
                None => Some(Upsert::Create(Outgoing::new(
                    plot_id,
                    outgoing::Draft {
                        identifier: derived.identifier().into(),
                        item_type: ItemType::Percentage,
                        unit_per_client: value,
                        rate_per_client: Decimal::ONE,
                        unit_per_market: Decimal::ONE,
                        rate_per_market: Decimal::ONE,
                    },
                ))),
                Some(existing) if existing.unit_per_client != value => {
                    Some(Upsert::Update {
                        before: existing.clone(),
                        after: Outgoing {
                            unit_per_client: value,
                            ..existing.clone()
                        },
                    })
                }
                Some(_) => None,
            }
        })
        .collect()
}

/// Substitutes the provided [`Upsert`]s into the in-memory `outgoings`.
pub fn apply(outgoings: &mut Vec<Outgoing>, upserts: &[Upsert]) {
    for upsert in upserts {
        match upsert {
            Upsert::Create(o) => outgoings.push(o.clone()),
            Upsert::Update { after, .. } => {
                if let Some(o) =
                    outgoings.iter_mut().find(|o| o.id == after.id)
                {
                    *o = after.clone();
                }
            }
        }
    }
}
