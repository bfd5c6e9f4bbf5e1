//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js timeline chart and the hover popup live in `assets/js/*.js`.
//! They are evaluated as globals (no ES modules) and exposed via
//! `window.*`; this module provides safe Rust wrappers that serialize data
//! and call those globals. Interaction flows the other way as
//! CustomEvents on `document` (`pulse-point-click`, `pulse-point-hover`,
//! `pulse-point-leave`), consumed through [`crate::dom`].

// Embed the chart JS files at compile time
static TIMELINE_CHART_JS: &str = include_str!("../assets/js/timeline-chart.js");
static HOVER_POPUP_JS: &str = include_str!("../assets/js/hover-popup.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('NewsPulse JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart JS files define functions via `function` declarations. To
/// ensure they become globally accessible (not block-scoped inside the
/// setInterval callback), we evaluate them at global scope via indirect
/// eval once D3 is ready, then explicitly promote each function to
/// `window.*`.
pub fn init_charts() {
    let all_js = [TIMELINE_CHART_JS, HOVER_POPUP_JS].join("\n");

    // Store the scripts on window so the polling callback can eval them
    // at global scope (not block-scoped inside setInterval).
    let store_js = format!(
        "window.__pulseChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__pulseChartScripts);
                    delete window.__pulseChartScripts;
                    if (typeof renderTimelineChart !== 'undefined') window.renderTimelineChart = renderTimelineChart;
                    if (typeof destroyTimelineChart !== 'undefined') window.destroyTimelineChart = destroyTimelineChart;
                    if (typeof showHoverPopup !== 'undefined') window.showHoverPopup = showHoverPopup;
                    if (typeof hideHoverPopup !== 'undefined') window.hideHoverPopup = hideHoverPopup;
                    window.__pulseChartsReady = true;
                    console.log('NewsPulse charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Render the timeline line chart into the given container.
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to
/// initialize, and the container DOM element to exist before rendering.
pub fn render_timeline_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__pulseChartsReady &&
                    typeof window.renderTimelineChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderTimelineChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[NewsPulse] renderTimelineChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up the chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Show the point-level hover popup near the given viewport coordinates.
pub fn show_hover_popup(data_json: &str, x: f64, y: f64) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        "if (window.showHoverPopup) window.showHoverPopup('{escaped_data}', {x}, {y});",
    ));
}

/// Remove the hover popup if one is showing.
pub fn hide_hover_popup() {
    call_js("if (window.hideHoverPopup) window.hideHoverPopup();");
}
