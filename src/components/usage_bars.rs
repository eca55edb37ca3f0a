//! Horizontal usage bars coloured by severity.

use leptos::prelude::*;

use crate::util::usage::UsageBar;

#[component]
pub fn UsageBars(bars: Vec<UsageBar>) -> impl IntoView {
    view! {
        <div class="usage-bars">
            {bars
                .into_iter()
                .map(|bar| {
                    let width = format!("width: {:.1}%", bar.percent);
                    let fill = format!("usage-bar__fill {}", bar.severity.css_modifier());
                    view! {
                        <div class="usage-bar">
                            <span class="usage-bar__label">{bar.label}</span>
                            <div class="usage-bar__track">
                                <div class=fill style=width></div>
                            </div>
                            <span class="usage-bar__value">{bar.display()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
