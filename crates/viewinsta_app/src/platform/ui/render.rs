use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use viewinsta_core::{
    AppViewModel, EditStage, EditView, ImageSummary, ReferralView, Tab, WatchView, WithdrawView,
    MINIMUM_WITHDRAWAL, PROCESSING_FEE,
};

use super::constants::*;
use super::input::InputMode;
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel, mode: &InputMode) {
    let areas = layout::split(frame.size());

    render_header(frame, areas.header, view);
    render_tabs(frame, areas.tabs, view.tab);
    match view.tab {
        Tab::Watch => render_watch(frame, areas.body, &view.watch),
        Tab::Edit => render_edit(frame, areas.body, &view.edit, mode),
        Tab::Refer => render_referral(frame, areas.body, &view.referral),
        Tab::Withdraw => render_withdraw(frame, areas.body, &view.withdraw, view),
    }
    frame.render_widget(
        Paragraph::new(help_text(view, mode)).style(Style::default().fg(MUTED)),
        areas.help,
    );
}

fn render_header(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let (title_area, balance_area) = layout::split_header(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            APP_TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(TAGLINE, Style::default().fg(MUTED)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, title_area);

    let balance = Paragraph::new(Line::from(vec![
        Span::raw("Balance: "),
        Span::styled(
            view.balance.to_string(),
            Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(balance, balance_area);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!("{} {}", tab.index() + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_watch(frame: &mut Frame, area: Rect, watch: &WatchView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Watch & Earn");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [video, progress, claim] = layout::split_watch(inner);

    let status = if watch.watched {
        Line::from(Span::styled(
            "Video complete! Claim your reward.",
            Style::default().fg(SUCCESS),
        ))
    } else {
        Line::from(format!(
            "Watch for {} more seconds to earn credits.",
            watch.remaining_secs
        ))
    };
    frame.render_widget(
        Paragraph::new(vec![Line::from("[ video playing ]"), Line::from(""), status])
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED)),
        video,
    );

    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(ACCENT))
            .percent(watch.progress_percent.min(100))
            .label(format!("{}s left", watch.remaining_secs)),
        progress,
    );

    let button_style = if watch.claim_enabled {
        Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("[ {} ]", watch.claim_label),
            button_style,
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL)),
        claim,
    );
}

fn render_edit(frame: &mut Frame, area: Rect, edit: &EditView, mode: &InputMode) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("AI Image Editor");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (original_area, edited_area, prompt_area, status_area) = layout::split_edit(inner);

    let original_lines = match (&edit.original, mode) {
        (_, InputMode::Path(buffer)) => vec![
            Line::from("Open image:"),
            Line::from(Span::styled(
                format!("{buffer}_"),
                Style::default().fg(ACCENT),
            )),
        ],
        (Some(image), _) => summary_lines(image),
        (None, _) => vec![
            Line::from("Upload an image"),
            Line::from(Span::styled(
                "PNG, JPG or WEBP. Press o to open.",
                Style::default().fg(MUTED),
            )),
        ],
    };
    frame.render_widget(
        Paragraph::new(original_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Original")),
        original_area,
    );

    let edited_lines = match (edit.stage, &edit.edited) {
        (EditStage::Loading, _) => vec![Line::from(Span::styled(
            "Generating...",
            Style::default().fg(ACCENT),
        ))],
        (_, Some(image)) => summary_lines(image),
        (_, None) => vec![Line::from(Span::styled(
            "Your edited image will appear here",
            Style::default().fg(MUTED),
        ))],
    };
    frame.render_widget(
        Paragraph::new(edited_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Edited")),
        edited_area,
    );

    let editing = *mode == InputMode::Prompt;
    let prompt_text = if editing {
        format!("{}_", edit.prompt)
    } else if edit.prompt.is_empty() {
        "e.g., Add a retro filter, make it black and white...".to_string()
    } else {
        edit.prompt.clone()
    };
    let prompt_style = match (editing, edit.prompt_enabled, edit.prompt.is_empty()) {
        (true, _, _) => Style::default().fg(ACCENT),
        (false, false, _) | (false, true, true) => Style::default().fg(MUTED),
        (false, true, false) => Style::default(),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(prompt_text, prompt_style))
            .block(Block::default().borders(Borders::ALL).title("Prompt")),
        prompt_area,
    );

    let status = match (&edit.error, &edit.notice) {
        (Some(error), _) => Line::from(Span::styled(error.as_str(), Style::default().fg(ERROR))),
        (None, Some(notice)) => {
            Line::from(Span::styled(notice.as_str(), Style::default().fg(SUCCESS)))
        }
        (None, None) if edit.generate_enabled => Line::from("Ready to generate."),
        (None, None) => Line::from(""),
    };
    frame.render_widget(
        Paragraph::new(status)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        status_area,
    );
}

fn summary_lines(image: &ImageSummary) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            image.label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} | {} bytes", image.mime_type, image.byte_len)),
    ]
}

fn render_referral(frame: &mut Frame, area: Rect, referral: &ReferralView) {
    let button_style = if referral.copied {
        Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    let lines = vec![
        Line::from(Span::styled(
            "Invite Friends, Earn Credits",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(referral.bonus_text.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            referral.link.as_str(),
            Style::default().fg(ACCENT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]", referral.button_label),
            button_style,
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Refer & Earn")),
        area,
    );
}

fn render_withdraw(frame: &mut Frame, area: Rect, withdraw: &WithdrawView, view: &AppViewModel) {
    let lines = match withdraw {
        WithdrawView::Form { amount_text, error } => {
            let mut lines = vec![
                Line::from(format!("Available: {} credits", view.balance)),
                Line::from(""),
                Line::from(vec![
                    Span::raw("Amount: "),
                    Span::styled(format!("{amount_text}_"), Style::default().fg(ACCENT)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "Minimum {} credits. A {} credit processing fee applies.",
                        MINIMUM_WITHDRAWAL, PROCESSING_FEE
                    ),
                    Style::default().fg(MUTED),
                )),
            ];
            if let Some(error) = error {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    error.as_str(),
                    Style::default().fg(ERROR),
                )));
            }
            lines
        }
        WithdrawView::Confirm { amount, fee, total } => vec![
            Line::from(Span::styled(
                "Confirm Withdrawal",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Amount:          {amount}")),
            Line::from(format!("Processing fee:  {fee}")),
            Line::from(Span::styled(
                format!("Total deducted:  {total}"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ],
        WithdrawView::Success => vec![
            Line::from(Span::styled(
                "Withdrawal Successful!",
                Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Your request has been processed."),
        ],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Withdraw Credits")),
        area,
    );
}

fn help_text(view: &AppViewModel, mode: &InputMode) -> String {
    let hint = match mode {
        InputMode::Prompt => "type prompt  enter/esc done",
        InputMode::Path(_) => "type image path  enter open  esc cancel",
        InputMode::Normal => match view.tab {
            Tab::Watch => "c claim",
            Tab::Edit => "o open  p prompt  g generate  s save  r reset",
            Tab::Refer => "c copy link",
            Tab::Withdraw => match view.withdraw {
                WithdrawView::Form { .. } => "digits amount  esc clear  enter withdraw",
                WithdrawView::Confirm { .. } => "y confirm  n cancel",
                WithdrawView::Success => "enter done",
            },
        },
    };
    match mode {
        InputMode::Normal => format!(" {hint}  tab/F1-F4 switch  q quit"),
        _ => format!(" {hint}"),
    }
}
