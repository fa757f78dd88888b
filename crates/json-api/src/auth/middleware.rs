//! API key middleware.

use salvo::prelude::*;

use crate::extensions::*;

pub(crate) const API_KEY_HEADER: &str = "x-api-key";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(candidate) = extract_api_key(req) else {
        res.render(StatusError::unauthorized().brief("Missing X-API-Key header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !state.accepts_api_key(candidate) {
        res.render(StatusError::unauthorized().brief("Invalid API key"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_api_key(req: &Request) -> Option<&str> {
    let value = req.headers().get(API_KEY_HEADER)?.to_str().ok()?.trim();

    (!value.is_empty()).then_some(value)
}
