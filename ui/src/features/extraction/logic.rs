//! Extraction run - drives the streaming client and turns its callbacks into
//! state actions

use crate::features::extraction::types::ExtractionAction;
use crate::services::client::{ExtractionRequest, ProgressEvent, StreamingExtractionClient};
use crate::services::streaming::{CancellationToken, ExtractionTransport};
use crate::{console_debug, console_error_with_dispatch, console_info, console_info_with_dispatch};

/// Run one extraction and report everything through `dispatch`.
///
/// Dispatches `StartExtraction`, then one `RecordProgress` per progress event,
/// then exactly one of `SetResult` / `SetError`. A cancelled run stops
/// dispatching as soon as the cancellation is observed.
pub async fn execute_extraction<T, D>(
    client: &StreamingExtractionClient<T>,
    request: ExtractionRequest,
    cancel: &CancellationToken,
    mut dispatch: D,
) where
    T: ExtractionTransport,
    D: FnMut(ExtractionAction),
{
    dispatch(ExtractionAction::StartExtraction);
    console_info_with_dispatch!(
        dispatch,
        "[Extraction] Extracting {} metadata for {}",
        request.schema(),
        request.repo_url()
    );

    let outcome = {
        let mut on_progress = |event: ProgressEvent| {
            console_debug!(
                "[Extraction] Step {} {:?}: {}",
                event.step,
                event.status,
                event.label
            );
            dispatch(ExtractionAction::RecordProgress(event));
        };
        client
            .extract_with_cancel(&request, Some(&mut on_progress), cancel)
            .await
    };

    match outcome {
        Ok(result) => {
            console_info_with_dispatch!(
                dispatch,
                "[Extraction] Completed with {} annotated properties",
                result.enriched_property_count()
            );
            dispatch(ExtractionAction::SetResult(Box::new(result)));
        }
        Err(error) if error.is_cancelled() => {
            console_info!("[Extraction] Cancelled for {}", request.repo_url());
        }
        Err(error) => {
            console_error_with_dispatch!(dispatch, "[Extraction] Failed: {}", error);
            dispatch(ExtractionAction::SetError(error.to_string()));
        }
    }
}
