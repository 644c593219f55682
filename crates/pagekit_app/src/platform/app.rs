use pagekit_core::{AppViewModel, ElementId, PageConfig, Point, Severity};
use pagekit_engine::{Document, Page};
use pagekit_logging::{page_debug, page_info, page_warn};

use super::scenario::{Scenario, ScenarioError, Step};

/// Installs a page on `markup`, replays every step and returns the final view model.
pub(crate) fn run(
    markup: &str,
    config: PageConfig,
    scenario: &Scenario,
) -> Result<AppViewModel, ScenarioError> {
    let mut document = Document::from_html(markup);
    document.set_capabilities(scenario.capabilities);
    let mut page = Page::install(document, config);
    // Let load-time deferred wiring run before the first step.
    page.advance(0);

    for (index, step) in scenario.steps.iter().enumerate() {
        page_debug!("step {}: {:?}", index, step);
        apply(&mut page, index, step)?;
    }

    let view = page.view();
    page_info!(
        "replayed {} steps over {}ms: nav_open={}, header_emphasized={}, {} revealed, notification={:?}",
        scenario.steps.len(),
        page.now_ms(),
        view.nav_open,
        view.header.emphasized,
        view.revealed.len(),
        view.notification.as_ref().map(|notification| notification.message.as_str())
    );
    page.dispose();
    Ok(view)
}

fn apply(page: &mut Page, index: usize, step: &Step) -> Result<(), ScenarioError> {
    let document_error = |source| ScenarioError::Document { index, source };
    match step {
        Step::Scroll(y) => page.scroll_to(*y),
        Step::Click(selector) => {
            let target = resolve(page, index, selector)?;
            page.click(target).map_err(document_error)?;
        }
        Step::PressAt(selector, x, y) => {
            let target = resolve(page, index, selector)?;
            page.press_at(target, Point { x: *x, y: *y })
                .map_err(document_error)?;
        }
        Step::Fill(field, value) => page.fill(field, value).map_err(document_error)?,
        Step::Submit => page.submit_form(),
        Step::Notify(message, severity) => {
            page.notify(message.clone(), Severity::from_name(severity));
        }
        Step::CloseNotification => match page.notification_close_button() {
            Some(button) => page.click(button).map_err(document_error)?,
            None => page_warn!("step {}: no notification to close", index),
        },
        Step::Advance(ms) => page.advance(*ms),
    }
    Ok(())
}

fn resolve(page: &Page, index: usize, selector: &str) -> Result<ElementId, ScenarioError> {
    page.document()
        .select_first(selector)
        .map_err(|source| ScenarioError::Document { index, source })?
        .ok_or_else(|| ScenarioError::NoTarget {
            index,
            selector: selector.to_string(),
        })
}
