//! スキル評価のプログレスバー
//!
//! 0%で描画してから少し遅れて目標幅を設定し、CSS transitionで伸ばす

use gloo::timers::callback::Timeout;
use intern_report_common::PROGRESS_ANIMATION_DELAY_MS;
use leptos::prelude::*;

#[component]
pub fn ProgressBar(percentage: u8) -> impl IntoView {
    let (width, set_width) = signal(0u8);

    Timeout::new(PROGRESS_ANIMATION_DELAY_MS, move || {
        set_width.try_set(percentage);
    })
    .forget();

    view! {
        <div class="skill-progress">
            <div
                class="skill-progress-bar"
                style=move || format!("width: {}%;", width.get())
                data-width=format!("{}%", percentage)
            />
        </div>
    }
}
