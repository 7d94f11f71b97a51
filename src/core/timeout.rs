//! Bounded waits for availability probes.
//!
//! Native builds sleep on the tokio timer; browser builds on `setTimeout`.

use futures::future::{self, Either};
use std::future::Future;
use std::time::Duration;

/// Upper bound for `is_available` / `is_platform_wrapper`
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

#[cfg(all(feature = "native", not(feature = "wasm")))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(feature = "wasm")]
pub async fn sleep(duration: Duration) {
    use wasm_bindgen::JsCast;

    let millis = duration.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let global = js_sys::global();
        let set_timeout = js_sys::Reflect::get(&global, &"setTimeout".into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        match set_timeout {
            Some(f) => {
                let _ = f.call2(&global, &resolve, &millis.into());
            }
            // No timer in this realm: resolve immediately rather than hang
            None => {
                let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
            }
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(not(any(feature = "native", feature = "wasm")))]
compile_error!("enable either the `native` or the `wasm` feature");

/// Run `fut` for at most `limit`. `None` means the deadline won.
pub async fn with_timeout<F: Future>(limit: Duration, fut: F) -> Option<F::Output> {
    let fut = Box::pin(fut);
    let timer = Box::pin(sleep(limit));
    match future::select(fut, timer).await {
        Either::Left((value, _)) => Some(value),
        Either::Right(_) => None,
    }
}

/// Boolean probe that degrades to `false` when it does not answer in time
pub async fn probe<F: Future<Output = bool>>(limit: Duration, fut: F) -> bool {
    with_timeout(limit, fut).await.unwrap_or(false)
}
