use crate::aic::common::error::Result;
use crate::aic::orchestrator::pipeline::Aic;
use crate::aic::params::Ipu3UapiParams;
use crate::aic::pipe::AicEngine;
use crate::aic::runtime::AlgorithmResultsView;

/// One frame's 3A results bound to an [`Aic`].
///
/// Holds the `Aic` mutably and the results immutably, so neither can be
/// touched by anyone else until the binding is dropped, and the results
/// cannot be retained past it.
pub struct FrameParams<'a, 'r, E: AicEngine> {
    aic: &'a mut Aic<E>,
    results: AlgorithmResultsView<'r>,
}

impl<'a, 'r, E: AicEngine> FrameParams<'a, 'r, E> {
    pub(crate) fn new(aic: &'a mut Aic<E>, results: AlgorithmResultsView<'r>) -> Self {
        Self { aic, results }
    }

    /// Compute the ISP config for the bound results and encode it into
    /// `params`. May be called repeatedly; each call is independent.
    pub fn run(&mut self, params: &mut Ipu3UapiParams) -> Result<()> {
        self.aic.run_frame(&self.results, params)
    }

    pub fn results(&self) -> &AlgorithmResultsView<'r> {
        &self.results
    }
}
