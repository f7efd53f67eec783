//! 表示モデル → HTML / テキスト
//!
//! Web版と同じマークアップ（skill-card / insight リスト）を文字列で生成する。
//! バックエンド由来の文字列はすべてエスケープする。

use std::fmt::Write;

use crate::render::{ListView, RenderedReport, SkillCard};

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn skill_card_html(out: &mut String, card: &SkillCard) {
    let _ = write!(
        out,
        r#"<div class="skill-card">
  <div class="skill-header">
    <div class="skill-name"><i class="fas {icon} skill-icon"></i> {label}</div>
    <span class="skill-rating {class}">{rating}</span>
  </div>
  <div class="skill-progress">
    <div class="skill-progress-bar" style="--target-width: {pct}%; width: {pct}%;" data-width="{pct}%"></div>
  </div>
</div>
"#,
        icon = card.icon,
        label = html_escape(&card.label),
        class = card.rating_class,
        rating = html_escape(&card.rating),
        pct = card.percentage,
    );
}

fn list_html(out: &mut String, id: &str, list: &ListView) {
    let _ = writeln!(out, r#"<ul class="insight-list" id="{}">"#, id);
    for line in list.lines() {
        let _ = writeln!(out, "  <li>{}</li>", html_escape(line));
    }
    out.push_str("</ul>\n");
}

/// レポート本体のHTML断片
pub fn to_html(report: &RenderedReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<p class="report-description" id="reportDescription">{}</p>"#,
        html_escape(&report.description)
    );

    out.push_str("<div class=\"skills-grid\" id=\"skillsGrid\">\n");
    for card in &report.skills {
        skill_card_html(&mut out, card);
    }
    out.push_str("</div>\n");

    let sections = [
        ("Strengths", "strengthsList", "insight-strengths", &report.strengths),
        ("Areas for Improvement", "weaknessesList", "insight-weaknesses", &report.weaknesses),
        ("Recommendations", "recommendationsList", "insight-recommendations", &report.recommendations),
    ];
    out.push_str("<div class=\"insights-grid\">\n");
    for (title, id, class, list) in sections {
        let _ = writeln!(out, r#"<div class="insight-card {}">"#, class);
        let _ = writeln!(out, "<h3>{}</h3>", title);
        list_html(&mut out, id, list);
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");

    let _ = writeln!(
        out,
        r#"<div class="motivational-card"><p id="motivationalText">{}</p></div>"#,
        html_escape(&report.motivational_note)
    );

    out
}

const DOCUMENT_STYLE: &str = r#"
body { font-family: 'Segoe UI', Helvetica, Arial, sans-serif; background: #f5f7fb; color: #1f2937; margin: 0; }
.container { max-width: 1000px; margin: 0 auto; padding: 2rem; }
.report-description { color: #6b7280; }
.skills-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }
.skill-card { background: #fff; border-radius: 12px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.skill-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: .75rem; }
.skill-name { font-weight: 600; }
.skill-rating { font-size: .8rem; padding: .2rem .6rem; border-radius: 999px; }
.rating-excellent { background: #d1fae5; color: #065f46; }
.rating-good { background: #dbeafe; color: #1e40af; }
.rating-average { background: #fef3c7; color: #92400e; }
.rating-below { background: #fee2e2; color: #991b1b; }
.skill-progress { height: 8px; background: #e5e7eb; border-radius: 4px; overflow: hidden; }
.skill-progress-bar { height: 100%; background: linear-gradient(90deg, #6366f1, #8b5cf6); animation: fill 1s ease-out; }
@keyframes fill { from { width: 0%; } to { width: var(--target-width); } }
.insights-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 1rem; margin-top: 1.5rem; }
.insight-card { background: #fff; border-radius: 12px; padding: 1rem 1.25rem; }
.motivational-card { margin-top: 1.5rem; padding: 1.25rem; border-radius: 12px; background: #eef2ff; font-style: italic; }
footer { margin-top: 2rem; color: #9ca3af; font-size: .8rem; }
"#;

/// 単体で開けるHTMLドキュメント
#[cfg(feature = "document")]
pub fn to_document(report: &RenderedReport, title: &str) -> String {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
<style>{style}</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
{body}<footer>Generated {generated_at}</footer>
</div>
</body>
</html>
"#,
        title = html_escape(title),
        style = DOCUMENT_STYLE,
        body = to_html(report),
        generated_at = generated_at,
    )
}

fn list_text(out: &mut String, title: &str, list: &ListView) {
    let _ = writeln!(out, "\n{}", title);
    for line in list.lines() {
        let _ = writeln!(out, "  - {}", line);
    }
}

/// ターミナル表示用
pub fn to_text(report: &RenderedReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.description);

    if !report.skills.is_empty() {
        out.push_str("\nSkills\n");
        let width = report
            .skills
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(0);
        for card in &report.skills {
            let filled = usize::from(card.percentage) / 5;
            let _ = writeln!(
                out,
                "  {:<width$}  [{}{}] {:>3}%  {}",
                card.label,
                "#".repeat(filled),
                ".".repeat(20 - filled),
                card.percentage,
                card.rating,
                width = width,
            );
        }
    }

    list_text(&mut out, "Strengths", &report.strengths);
    list_text(&mut out, "Areas for Improvement", &report.weaknesses);
    list_text(&mut out, "Recommendations", &report.recommendations);

    let _ = writeln!(out, "\n{}", report.motivational_note);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_report;
    use crate::report::ReportPayload;

    fn rendered(json: &str) -> RenderedReport {
        let payload: ReportPayload = serde_json::from_str(json).unwrap();
        render_report(&payload, "overall")
    }

    #[test]
    fn test_html_escapes_backend_text() {
        let report = rendered(r#"{"type":"overall","strengths":["<script>alert('x')</script> & more"]}"#);
        let html = to_html(&report);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_skill_card_markup() {
        let report = rendered(r#"{"type":"overall","evaluated":{"Fluency Avg":"Good"}}"#);
        let html = to_html(&report);
        assert!(html.contains(r#"<i class="fas fa-comments skill-icon"></i> Fluency</div>"#));
        assert!(html.contains(r#"<span class="skill-rating rating-good">Good</span>"#));
        assert!(html.contains(r#"data-width="75%""#));
        assert!(html.contains("No weaknesses data available"));
        assert!(html.contains("Comprehensive analysis of all interns"));
    }

    #[test]
    fn test_html_empty_list_has_no_items() {
        let report = rendered(r#"{"type":"overall","strengths":[]}"#);
        let html = to_html(&report);
        assert!(html.contains("<ul class=\"insight-list\" id=\"strengthsList\">\n</ul>"));
    }

    #[test]
    fn test_text_output() {
        let report = rendered(
            r#"{"type":"overall","evaluated":{"Grammar Avg":"Excellent"},"motivational_note":"Nice!"}"#,
        );
        let text = to_text(&report);
        assert!(text.starts_with("Comprehensive analysis of all interns\n"));
        assert!(text.contains("Grammar  [###################.]  95%  Excellent"));
        assert!(text.contains("  - No strengths data available"));
        assert!(text.trim_end().ends_with("Nice!"));
    }

    #[cfg(feature = "document")]
    #[test]
    fn test_document_wraps_fragment() {
        let report = rendered(r#"{"type":"overall"}"#);
        let doc = to_document(&report, "Intern <Report>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Intern &lt;Report&gt;</title>"));
        assert!(doc.contains("id=\"motivationalText\""));
    }
}
