//! [`Plot`]-related read definitions.

use crate::domain::{
    valuation::{self, Computation, Records},
    Insurance, Outgoing, Parking, Plot, StoredValues, Tenant, Valuation,
};

/// [`Plot`] along with all the records it's valued out of.
#[derive(Clone, Debug)]
pub struct Graph {
    /// [`Plot`] itself.
    pub plot: Plot,

    /// [`Tenant`]s of the [`Plot`].
    pub tenants: Vec<Tenant>,

    /// [`Parking`]s of the [`Plot`].
    pub parking: Vec<Parking>,

    /// [`Outgoing`]s of the [`Plot`].
    pub outgoings: Vec<Outgoing>,

    /// [`Insurance`] lines of the [`Plot`].
    pub insurances: Vec<Insurance>,

    /// [`StoredValues`] of the [`Plot`].
    pub stored_values: StoredValues,
}

impl Graph {
    /// Borrows the [`Records`] of this [`Graph`].
    #[must_use]
    pub fn records(&self) -> Records<'_> {
        Records {
            plot: &self.plot,
            tenants: &self.tenants,
            parking: &self.parking,
            outgoings: &self.outgoings,
            insurances: &self.insurances,
            stored_values: &self.stored_values,
        }
    }

    /// Computes the [`Valuation`] of this [`Graph`].
    #[must_use]
    pub fn compute(&self) -> Computation {
        valuation::compute(self.records())
    }

    /// Values this [`Graph`], substituting the reconciled [`Outgoing`]s in
    /// memory.
    #[must_use]
    pub fn valuate(mut self) -> Valuated {
        let Computation {
            valuation,
            outgoings,
            ..
        } = self.compute();
        self.outgoings = outgoings;
        Valuated {
            graph: self,
            valuation,
        }
    }
}

/// [`Graph`] along with its [`Valuation`].
#[derive(Clone, Debug)]
pub struct Valuated {
    /// Valued [`Graph`], with its [`Outgoing`]s sorted for display.
    pub graph: Graph,

    /// [`Valuation`] of the [`Graph`].
    pub valuation: Valuation,
}
