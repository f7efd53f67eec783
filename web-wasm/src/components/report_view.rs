//! レポート表示コンポーネント

use intern_report_common::{ListView, RenderedReport, SkillCard};
use leptos::prelude::*;
use crate::components::progress_bar::ProgressBar;

#[component]
fn SkillCardView(card: SkillCard) -> impl IntoView {
    view! {
        <div class="skill-card">
            <div class="skill-header">
                <div class="skill-name">
                    <i class=format!("fas {} skill-icon", card.icon)></i>
                    " "{card.label}
                </div>
                <span class=format!("skill-rating {}", card.rating_class)>{card.rating}</span>
            </div>
            <ProgressBar percentage=card.percentage />
        </div>
    }
}

#[component]
fn InsightCard(
    title: &'static str,
    icon: &'static str,
    css_class: &'static str,
    list_id: &'static str,
    list: ListView,
) -> impl IntoView {
    let items = list
        .lines()
        .into_iter()
        .map(|line| view! { <li>{line.to_string()}</li> })
        .collect_view();

    view! {
        <div class=format!("insight-card {}", css_class)>
            <h3><i class=format!("fas {}", icon)></i>" "{title}</h3>
            <ul class="insight-list" id=list_id>{items}</ul>
        </div>
    }
}

#[component]
pub fn ReportView<FN>(report: RenderedReport, on_new_report: FN) -> impl IntoView
where
    FN: Fn(()) + 'static + Clone + Send + Sync,
{
    let skills = report
        .skills
        .into_iter()
        .map(|card| view! { <SkillCardView card=card /> })
        .collect_view();

    view! {
        <section class="report-section" id="reportSection">
            <div class="report-header">
                <h2>"Communication Report"</h2>
                <p class="report-description" id="reportDescription">{report.description}</p>
            </div>

            <div class="skills-grid" id="skillsGrid">{skills}</div>

            <div class="insights-grid">
                <InsightCard
                    title="Strengths"
                    icon="fa-star"
                    css_class="insight-strengths"
                    list_id="strengthsList"
                    list=report.strengths
                />
                <InsightCard
                    title="Areas for Improvement"
                    icon="fa-exclamation-triangle"
                    css_class="insight-weaknesses"
                    list_id="weaknessesList"
                    list=report.weaknesses
                />
                <InsightCard
                    title="Recommendations"
                    icon="fa-lightbulb"
                    css_class="insight-recommendations"
                    list_id="recommendationsList"
                    list=report.recommendations
                />
            </div>

            <div class="motivational-card">
                <i class="fas fa-quote-left"></i>
                <p id="motivationalText">{report.motivational_note}</p>
            </div>

            <button
                type="button"
                class="btn btn-secondary"
                id="newReportBtn"
                on:click=move |_| on_new_report(())
            >
                <i class="fas fa-redo"></i>
                " Generate New Report"
            </button>
        </section>
    }
}
