//! Canned per-binding behaviors for the stub backend.
//!
//! Each behavior validates the inputs its binding requires, then fills the
//! requested outputs with fixture data of the shapes the native library
//! documents. Matrices are column-major with points as columns, matching the
//! ABI convention.

use std::sync::atomic::Ordering;

use super::store::{self, ParamStore, Value};
use crate::ffi::{ParamsHandle, TimersHandle};

pub(crate) unsafe fn run(name: &str, params: ParamsHandle, timers: TimersHandle) -> bool {
    let params = store::params(params);
    super::testing::record(params);

    if store::take_fail_next_run() {
        log::debug!("stub: forced failure for binding '{}'", name);
        return false;
    }
    if params.binding != name {
        log::error!(
            "stub: parameter set for '{}' passed to binding '{}'",
            params.binding,
            name
        );
        return false;
    }

    let ok = match name {
        "adaboost" => classifier(params, "adaboost_model"),
        "cf" => cf(params),
        "dbscan" => dbscan(params),
        "decision_tree" => classifier(params, "decision_tree_model"),
        "hmm_train" => hmm_train(params),
        "kmeans" => kmeans(params),
        "knn" => knn(params),
        "linear_regression" => linear_regression(params),
        "logistic_regression" => classifier(params, "logistic_regression_model"),
        "pca" => pca(params),
        "random_forest" => classifier(params, "random_forest_model"),
        "sparse_coding" => sparse_coding(params),
        _ => {
            log::error!("stub: unknown binding '{}'", name);
            false
        }
    };

    if store::VERBOSE.load(Ordering::SeqCst) {
        let elapsed = store::timers(timers).started.elapsed();
        log::info!(
            "stub: binding '{}' finished in {:?}, success={}",
            name,
            elapsed,
            ok
        );
    }
    ok
}

fn mat_dims(params: &ParamStore, key: &str) -> Option<(usize, usize)> {
    params.mat(key).map(|(_, rows, cols)| (rows, cols))
}

fn mat_clone(params: &ParamStore, key: &str) -> Option<(Vec<f64>, usize, usize)> {
    params
        .mat(key)
        .map(|(data, rows, cols)| (data.to_vec(), rows, cols))
}

fn ucol_len(params: &ParamStore, key: &str) -> Option<usize> {
    match params.values.get(key) {
        Some(Value::UCol(data)) => Some(data.len()),
        _ => None,
    }
}

fn missing(params: &ParamStore, what: &str) -> bool {
    log::error!(
        "stub: binding '{}' invoked without {}",
        params.binding,
        what
    );
    false
}

/// Places the output model, reusing the caller's input model pointer when one
/// was provided (the behavior the native library documents for incremental
/// training).
fn emit_model(params: &mut ParamStore, tag: &'static str) {
    if !params.is_passed("output_model") {
        return;
    }
    let ptr = match params.model("input_model") {
        Some(ptr) => ptr as usize,
        None => store::new_model(tag, vec![0x4d]) as usize,
    };
    params.values.insert("output_model".into(), Value::Model(ptr));
}

/// Shared shape for the supervised classifiers: train-or-load a model, then
/// optionally predict on a test matrix.
fn classifier(params: &mut ParamStore, tag: &'static str) -> bool {
    let trained = params.mat("training").is_some() && ucol_len(params, "labels").is_some();
    if !trained && params.model("input_model").is_none() {
        return missing(params, "training data or an input model");
    }
    emit_model(params, tag);
    if let Some((_, n)) = mat_dims(params, "test") {
        if params.is_passed("predictions") {
            params
                .values
                .insert("predictions".into(), Value::UCol(vec![0; n]));
        }
        if params.is_passed("probabilities") {
            params.values.insert(
                "probabilities".into(),
                Value::Mat {
                    data: vec![0.5; 2 * n],
                    rows: 2,
                    cols: n,
                },
            );
        }
    }
    true
}

fn cf(params: &mut ParamStore) -> bool {
    if params.mat("training").is_none() && params.model("input_model").is_none() {
        return missing(params, "training tuples or an input model");
    }
    emit_model(params, "cf_model");
    if params.is_passed("output") {
        let users = ucol_len(params, "query").unwrap_or(1);
        let recs = params.int("recommendations").unwrap_or(5).max(1) as usize;
        params.values.insert(
            "output".into(),
            Value::UMat {
                data: vec![0; recs * users],
                rows: recs,
                cols: users,
            },
        );
    }
    true
}

fn dbscan(params: &mut ParamStore) -> bool {
    let (input, dims, points) = match mat_clone(params, "input") {
        Some(m) => m,
        None => return missing(params, "an input matrix"),
    };
    if params.is_passed("assignments") {
        params
            .values
            .insert("assignments".into(), Value::UCol(vec![0; points]));
    }
    if params.is_passed("centroids") {
        // One cluster centered on the first point.
        params.values.insert(
            "centroids".into(),
            Value::Mat {
                data: input[..dims].to_vec(),
                rows: dims,
                cols: 1,
            },
        );
    }
    true
}

fn hmm_train(params: &mut ParamStore) -> bool {
    if params.mat("input").is_none() && params.model("input_model").is_none() {
        return missing(params, "an observation matrix or an input model");
    }
    // The HMM ABI predates typed model metadata; its models are untyped.
    emit_model(params, "unknown");
    true
}

fn kmeans(params: &mut ParamStore) -> bool {
    let (input, dims, points) = match mat_clone(params, "input") {
        Some(m) => m,
        None => return missing(params, "an input matrix"),
    };
    let clusters = match params.int("clusters") {
        Some(c) if c > 0 && (c as usize) <= points => c as usize,
        _ => return missing(params, "a cluster count within the point count"),
    };
    if params.is_passed("centroid") {
        // First `clusters` points, which are the leading columns.
        params.values.insert(
            "centroid".into(),
            Value::Mat {
                data: input[..clusters * dims].to_vec(),
                rows: dims,
                cols: clusters,
            },
        );
    }
    if params.is_passed("output") {
        let mut data = Vec::with_capacity((dims + 1) * points);
        for point in 0..points {
            data.extend_from_slice(&input[point * dims..(point + 1) * dims]);
            data.push((point % clusters) as f64);
        }
        params.values.insert(
            "output".into(),
            Value::Mat {
                data,
                rows: dims + 1,
                cols: points,
            },
        );
    }
    true
}

fn knn(params: &mut ParamStore) -> bool {
    let reference = mat_dims(params, "reference");
    if reference.is_none() && params.model("input_model").is_none() {
        return missing(params, "a reference matrix or an input model");
    }
    let k = match params.int("k") {
        Some(k) if k > 0 => k as usize,
        _ => return missing(params, "a positive neighbor count"),
    };
    emit_model(params, "knn_model");
    let queries = mat_dims(params, "query")
        .or(reference)
        .map(|(_, cols)| cols);
    if let Some(n) = queries {
        let ref_points = reference.map(|(_, cols)| cols).unwrap_or(n).max(1);
        if params.is_passed("neighbors") {
            let mut data = Vec::with_capacity(k * n);
            for point in 0..n {
                for neighbor in 0..k {
                    data.push(((point + neighbor) % ref_points) as u64);
                }
            }
            params.values.insert(
                "neighbors".into(),
                Value::UMat {
                    data,
                    rows: k,
                    cols: n,
                },
            );
        }
        if params.is_passed("distances") {
            let mut data = Vec::with_capacity(k * n);
            for _ in 0..n {
                for neighbor in 0..k {
                    data.push(neighbor as f64);
                }
            }
            params.values.insert(
                "distances".into(),
                Value::Mat {
                    data,
                    rows: k,
                    cols: n,
                },
            );
        }
    }
    true
}

fn linear_regression(params: &mut ParamStore) -> bool {
    let trained = params.mat("training").is_some()
        && matches!(params.values.get("training_responses"), Some(Value::Col(_)));
    if !trained && params.model("input_model").is_none() {
        return missing(params, "training data with responses or an input model");
    }
    emit_model(params, "linear_regression_model");
    if let Some((_, n)) = mat_dims(params, "test") {
        if params.is_passed("output_predictions") {
            params
                .values
                .insert("output_predictions".into(), Value::Col(vec![0.0; n]));
        }
    }
    true
}

fn pca(params: &mut ParamStore) -> bool {
    let (input, dims, points) = match mat_clone(params, "input") {
        Some(m) => m,
        None => return missing(params, "an input matrix"),
    };
    if params.is_passed("output") {
        let new_dims = match params.int("new_dimensionality") {
            Some(d) if d > 0 => (d as usize).min(dims),
            _ => dims,
        };
        let mut data = Vec::with_capacity(new_dims * points);
        for point in 0..points {
            data.extend_from_slice(&input[point * dims..point * dims + new_dims]);
        }
        params.values.insert(
            "output".into(),
            Value::Mat {
                data,
                rows: new_dims,
                cols: points,
            },
        );
    }
    true
}

fn sparse_coding(params: &mut ParamStore) -> bool {
    let training = mat_clone(params, "training");
    if training.is_none() && params.model("input_model").is_none() {
        return missing(params, "a training matrix or an input model");
    }
    let atoms = match params.int("atoms") {
        Some(a) if a > 0 => a as usize,
        _ if training.is_none() => 1,
        _ => return missing(params, "a positive atom count"),
    };
    emit_model(params, "sparse_coding_model");
    if let Some((input, dims, points)) = training {
        if params.is_passed("dictionary") {
            let take = atoms.min(points);
            let mut data = input[..take * dims].to_vec();
            data.resize(atoms * dims, 0.0);
            params.values.insert(
                "dictionary".into(),
                Value::Mat {
                    data,
                    rows: dims,
                    cols: atoms,
                },
            );
        }
    }
    if let Some((_, n)) = mat_dims(params, "test") {
        if params.is_passed("codes") {
            params.values.insert(
                "codes".into(),
                Value::Mat {
                    data: vec![0.0; atoms * n],
                    rows: atoms,
                    cols: n,
                },
            );
        }
    }
    true
}
