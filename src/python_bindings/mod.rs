//! Python bindings that expose the point-counting pipeline via PyO3.
use pyo3::{exceptions::PyValueError, prelude::*, types::PyModule};

use crate::{
    count_points, DegreeEstimator, EPolyError, GenusSweep, SampleCollector, SweepConfig,
};

/// Python-facing entry point for E-polynomial computations.
#[pyclass]
#[derive(Debug)]
pub struct PyEPolyEngine {
    config: SweepConfig,
}

#[pymethods]
impl PyEPolyEngine {
    #[new]
    #[pyo3(signature = (verify=false, parallel=false))]
    /// Create an engine; `verify` checks each fit against an extra sample.
    pub fn new(verify: bool, parallel: bool) -> Self {
        Self {
            config: SweepConfig::for_max_genus(1)
                .with_verification(verify)
                .with_parallelism(parallel),
        }
    }

    /// Count solutions for `genus` over GF(`q`).
    pub fn count_points(&self, genus: u32, q: u64) -> PyResult<u64> {
        count_points(genus, q).map_err(to_py_err)
    }

    /// Collect `count` samples for `genus`.
    ///
    /// Returns:
    ///     List of `(q, count)` tuples in increasing q.
    pub fn collect_samples(&self, genus: u32, count: usize) -> PyResult<Vec<(u64, u64)>> {
        let samples = SampleCollector::new(genus)
            .with_max_field_order(self.config.max_field_order)
            .parallel(self.config.parallel)
            .collect(count)
            .map_err(to_py_err)?;
        Ok(samples
            .samples()
            .iter()
            .map(|s| (s.field_order, s.count))
            .collect())
    }

    /// E-polynomial for `genus`, optionally with a fixed degree bound.
    ///
    /// Returns:
    ///     List of `(numerator, denominator)` decimal strings, lowest degree first.
    #[pyo3(signature = (genus, degree=None))]
    pub fn e_polynomial(&self, genus: u32, degree: Option<usize>) -> PyResult<Vec<(String, String)>> {
        let poly = self.solve(genus, degree)?;
        Ok(poly
            .coefficients()
            .iter()
            .map(|c| (c.numer().to_string(), c.denom().to_string()))
            .collect())
    }

    /// E-polynomial for `genus` rendered as LaTeX.
    #[pyo3(signature = (genus, degree=None))]
    pub fn e_polynomial_latex(&self, genus: u32, degree: Option<usize>) -> PyResult<String> {
        Ok(self.solve(genus, degree)?.to_latex())
    }
}

impl PyEPolyEngine {
    fn solve(&self, genus: u32, degree: Option<usize>) -> PyResult<crate::EPolynomial> {
        let estimator = degree.map_or(DegreeEstimator::Standard, DegreeEstimator::Fixed);
        let config = SweepConfig {
            max_genus: genus,
            degree_estimator: estimator,
            ..self.config.clone()
        };
        GenusSweep::new(config)
            .solve_genus(genus)
            .map(|result| result.polynomial)
            .map_err(to_py_err)
    }
}

fn to_py_err(err: EPolyError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Create Python module.
#[pymodule]
pub fn surface_epoly_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEPolyEngine>()?;
    Ok(())
}
