use crate::config::{FailurePolicy, PackerConfig, SortOrder};
use crate::error::{PackError, Result};
use crate::model::{Layout, Meta, Placement, Request};
use crate::packer::Packer;
use tracing::{debug, info, instrument};

/// Sorts requests in place per `order`. Sorting is stable.
///
/// `AreaDesc` is the exact reverse of `AreaAsc`, so equal-area requests come
/// out with keys descending.
pub fn sort_requests<K: Ord>(requests: &mut [Request<K>], order: &SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::AreaAsc => {
            requests.sort_by(|a, b| a.area().cmp(&b.area()).then_with(|| a.key.cmp(&b.key)))
        }
        SortOrder::AreaDesc => {
            requests.sort_by(|a, b| b.area().cmp(&a.area()).then_with(|| b.key.cmp(&a.key)))
        }
    }
}

/// Packs sizes onto a single canvas.
/// Inputs are (key, width, height). Returns the placements and, with
/// `FailurePolicy::Skip`, the requests that did not fit.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: PackerConfig,
) -> Result<Layout<String>> {
    let requests: Vec<Request<String>> = inputs
        .into_iter()
        .map(|(k, w, h)| Request::new(k.into(), w, h))
        .collect();
    pack_requests(requests, cfg)
}

/// Packs keyed requests onto a single canvas of `cfg.width x cfg.height`.
///
/// Notes:
/// - Requests are ordered per `cfg.sort_order` before insertion.
/// - A request that does not fit aborts the batch with `OutOfSpace` or is
///   recorded in `Layout::unplaced`, depending on `cfg.on_failure`.
/// - Zero-sized requests always abort with `InvalidRequest`.
pub fn pack_requests<K: Into<String>>(
    requests: Vec<Request<K>>,
    cfg: PackerConfig,
) -> Result<Layout<String>> {
    pack_with_tree(requests, cfg).map(|(layout, _)| layout)
}

#[instrument(skip_all)]
/// Same as [`pack_requests`], but also hands back the pack tree for inspection
/// (debug dumps, free-area queries, further manual inserts).
pub fn pack_with_tree<K: Into<String>>(
    requests: Vec<Request<K>>,
    cfg: PackerConfig,
) -> Result<(Layout<String>, Packer)> {
    cfg.validate()?;

    if requests.is_empty() {
        return Err(PackError::Empty);
    }

    let mut requests: Vec<Request<String>> = requests
        .into_iter()
        .map(|r| Request::new(r.key.into(), r.w, r.h))
        .collect();
    sort_requests(&mut requests, &cfg.sort_order);

    let mut packer = Packer::new(cfg.width, cfg.height)?;
    let mut placements: Vec<Placement> = Vec::with_capacity(requests.len());
    let mut unplaced: Vec<Request> = Vec::new();

    for (order, req) in requests.into_iter().enumerate() {
        match packer.insert(req.w, req.h) {
            Ok(rect) => {
                debug!(key = %req.key, %rect, "placed");
                placements.push(Placement {
                    key: req.key,
                    rect,
                    order,
                });
            }
            Err(PackError::DoesNotFit { .. }) => match cfg.on_failure {
                FailurePolicy::Abort => {
                    return Err(PackError::OutOfSpace {
                        key: req.key,
                        width: req.w,
                        height: req.h,
                        canvas_width: cfg.width,
                        canvas_height: cfg.height,
                    });
                }
                FailurePolicy::Skip => {
                    debug!(key = %req.key, w = req.w, h = req.h, "skipped, does not fit");
                    unplaced.push(req);
                }
            },
            Err(e) => return Err(e),
        }
    }

    info!(
        placed = placements.len(),
        unplaced = unplaced.len(),
        "packed onto {}x{} canvas",
        cfg.width,
        cfg.height
    );

    let meta = Meta {
        schema_version: "1".into(),
        app: "packnode".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        canvas: packer.canvas(),
        sort_order: cfg.sort_order,
        on_failure: cfg.on_failure,
    };
    Ok((
        Layout {
            placements,
            unplaced,
            meta,
        },
        packer,
    ))
}
