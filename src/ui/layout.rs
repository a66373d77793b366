use {
    super::renderer::{format_rupees, risk_bar, risk_color, severity_color, status_color, stream_status_label},
    crate::{
        engine_core::{filter_transactions, RiskLevel},
        stream::Snapshot,
    },
    ratatui::{
        layout::{Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
        Frame,
    },
};

/// View-only state owned by the terminal loop
#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub query: String,
    pub editing_query: bool,
}

/// Render the main UI layout
pub fn render_layout(f: &mut Frame, area: Rect, snapshot: &Snapshot, view: &ViewState) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Stat cards
            Constraint::Min(0),    // Transactions + alerts
            Constraint::Length(3), // Search / help
        ])
        .split(area);

    render_header(f, chunks[0], snapshot);
    render_stat_cards(f, chunks[1], snapshot);

    let body = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(chunks[2]);

    render_transactions_table(f, body[0], snapshot, &view.query);

    let side = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5), Constraint::Length(6)])
        .split(body[1]);

    render_alerts(f, side[0], snapshot);
    render_risk_distribution(f, side[1], snapshot);
    render_fraud_patterns(f, side[2], snapshot);
    render_footer(f, chunks[3], view);
}

fn render_header(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let (label, color) = stream_status_label(snapshot.status);

    let text = vec![Line::from(vec![
        Span::styled("Secure", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled("Bank", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" - Transaction Risk Monitor   "),
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!("   ticks: {}", snapshot.ticks)),
    ])];

    let header = Block::default().borders(Borders::ALL).title("Fraudflow");
    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_stat_cards(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let cards = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let stats = &snapshot.stats;
    let risk_color = if stats.risk_score > 50 { Color::Red } else { Color::Green };

    let entries = [
        ("Total Transactions", stats.total_transactions.to_string(), Color::Blue),
        ("Fraud Detected", stats.fraud_detected.to_string(), Color::Red),
        ("Total Volume", stats.volume_label(), Color::Green),
        ("Risk Score", format!("{}%", stats.risk_score), risk_color),
    ];

    for ((title, value, color), card) in entries.into_iter().zip(cards.iter()) {
        let text = Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        let block = Block::default().borders(Borders::ALL).title(title);
        f.render_widget(Paragraph::new(text).block(block), *card);
    }
}

fn render_transactions_table(f: &mut Frame, area: Rect, snapshot: &Snapshot, query: &str) {
    let visible = filter_transactions(&snapshot.transactions, query);

    let header = Row::new(vec![
        "Time", "User", "Type", "Merchant", "Location", "Amount", "Risk", "Status",
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|txn| {
            Row::new(vec![
                Cell::from(txn.time.clone()),
                Cell::from(txn.user_id.clone()),
                Cell::from(txn.kind.as_str()),
                Cell::from(txn.merchant.clone()),
                Cell::from(txn.location.clone()),
                Cell::from(format_rupees(txn.amount)),
                Cell::from(format!("{} {:>3}", risk_bar(txn.risk_score, 5), txn.risk_score))
                    .style(Style::default().fg(risk_color(txn.risk_score))),
                Cell::from(txn.status.as_str()).style(Style::default().fg(status_color(txn.status))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),  // Time
        Constraint::Length(8),  // User
        Constraint::Length(10), // Type
        Constraint::Length(16), // Merchant
        Constraint::Length(10), // Location
        Constraint::Length(10), // Amount
        Constraint::Length(9),  // Risk
        Constraint::Length(8),  // Status
    ];

    let title = if query.is_empty() {
        format!("Live Transactions ({})", visible.len())
    } else {
        format!(
            "Live Transactions ({} of {} matching \"{}\")",
            visible.len(),
            snapshot.transactions.len(),
            query
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

fn render_alerts(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let items: Vec<ListItem> = if snapshot.alerts.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No new alerts",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        snapshot
            .alerts
            .iter()
            .map(|alert| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        alert.message.clone(),
                        Style::default().fg(severity_color(alert.severity)),
                    )),
                    Line::from(Span::styled(
                        format!("  {} · {}", alert.time, alert.severity.as_str()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect()
    };

    let title = format!("Active Alerts ({})", snapshot.alerts.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn render_risk_distribution(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let distribution = &snapshot.risk_distribution;
    let lines: Vec<Line> = [
        (RiskLevel::Low, Color::Green),
        (RiskLevel::Medium, Color::Yellow),
        (RiskLevel::High, Color::Red),
    ]
    .into_iter()
    .map(|(level, color)| {
        Line::from(vec![
            Span::styled(format!("{:<12}", level.as_str()), Style::default().fg(color)),
            Span::raw(distribution.get(level).to_string()),
        ])
    })
    .collect();

    let block = Block::default().borders(Borders::ALL).title("Risk Distribution");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_fraud_patterns(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let total = snapshot.transactions.len();
    let lines: Vec<Line> = snapshot
        .flag_breakdown
        .counts
        .iter()
        .map(|(flag, count)| {
            let score = if total == 0 { 0 } else { (count * 100 / total) as u8 };
            Line::from(vec![
                Span::styled(format!("{:<20}", flag.as_str()), Style::default().fg(Color::Magenta)),
                Span::raw(format!("{} {:>2}", risk_bar(score, 8), count)),
            ])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title("Fraud Patterns");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, view: &ViewState) {
    let search_style = if view.editing_query {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if view.editing_query { "_" } else { "" };

    let text = vec![Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Cyan)),
        Span::styled(format!("{}{}", view.query, cursor), search_style),
        Span::raw(" | "),
        Span::raw("p: pause/resume  /: search  q: quit"),
    ])];

    let footer = Block::default().borders(Borders::ALL).title("Controls");
    f.render_widget(Paragraph::new(text).block(footer), area);
}
