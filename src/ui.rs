/// Numbers the dashboard header shows before any fetch completes.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub date: String,
    pub activity_count: usize,
    pub open_tasks: usize,
    pub latest_weight: Option<f64>,
}

pub fn render_index(summary: &DashboardSummary) -> String {
    let weight = summary
        .latest_weight
        .map(|w| format!("{w:.1} kg"))
        .unwrap_or_else(|| "--".to_string());
    INDEX_HTML
        .replace("{{DATE}}", &summary.date)
        .replace("{{ACTIVITIES}}", &summary.activity_count.to_string())
        .replace("{{OPEN_TASKS}}", &summary.open_tasks.to_string())
        .replace("{{WEIGHT}}", &weight)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Board</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1060px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 14px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    select,
    input {
      font: inherit;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      font-size: 0.9rem;
    }

    .legend .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border: 1px solid #aaa;
      margin-right: 5px;
    }

    #heatmap {
      overflow-x: auto;
    }

    #heatmap table {
      border-collapse: collapse;
    }

    #heatmap th {
      font-size: 0.8rem;
      font-weight: 500;
      color: #6b645d;
      padding: 4px 6px;
    }

    #heatmap td {
      width: 34px;
      height: 34px;
      border: 1px solid rgba(47, 72, 88, 0.12);
      cursor: pointer;
    }

    #weight-chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .board {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 12px;
    }

    .column {
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.12);
      padding: 10px;
      display: grid;
      gap: 8px;
      align-content: start;
      min-height: 120px;
    }

    .column h3 {
      margin: 0;
      font-size: 0.95rem;
    }

    .task {
      background: white;
      border: 1px solid rgba(47, 72, 88, 0.15);
      border-radius: 8px;
      padding: 8px;
      font-size: 0.85rem;
      display: grid;
      gap: 4px;
    }

    .task .meta {
      color: #8b857d;
      font-size: 0.75rem;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 700px) {
      .board {
        grid-template-columns: 1fr 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Board</h1>
      <p class="subtitle">Daily statuses, weight trend, and the task board in one place.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Date</span>
        <span class="value">{{DATE}}</span>
      </div>
      <div class="stat">
        <span class="label">Activities</span>
        <span class="value">{{ACTIVITIES}}</span>
      </div>
      <div class="stat">
        <span class="label">Open tasks</span>
        <span class="value">{{OPEN_TASKS}}</span>
      </div>
      <div class="stat">
        <span class="label">Latest weight</span>
        <span class="value">{{WEIGHT}}</span>
      </div>
    </section>

    <section class="card">
      <div class="row">
        <h2>Activity heatmap</h2>
        <select id="month-select" aria-label="Month"></select>
      </div>
      <div class="legend" id="legend"></div>
      <div id="heatmap"></div>
      <form id="status-form" class="row">
        <input id="status-activity" placeholder="activity" required />
        <input id="status-date" type="date" required />
        <select id="status-value"></select>
        <button type="submit">Set status</button>
      </form>
    </section>

    <section class="card">
      <div class="row">
        <h2>Weight trend</h2>
        <form id="weight-form" class="row">
          <input id="weight-value" type="number" step="0.1" min="1" placeholder="kg" required />
          <input id="weight-date" type="date" required />
          <button type="submit">Add</button>
        </form>
      </div>
      <svg id="weight-chart" viewBox="0 0 720 260" role="img" aria-label="Weight chart"></svg>
    </section>

    <section class="card">
      <h2>Tasks</h2>
      <div class="board" id="board"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const STATUS_COLORS = {
      suck: '#9e9e9e',
      failed: '#ef5350',
      regular: '#ffeb3b',
      accomplished: '#66bb6a',
      excellence: '#42a5f5',
      none: '#f5f5f5'
    };
    const STATUS_LABELS = ['suck', 'failed', 'regular', 'accomplished', 'excellence'];
    const STATUS_VALUES = { 0.001: 'suck', 0.2: 'failed', 0.5: 'regular', 1: 'accomplished', 1.2: 'excellence' };
    const TASK_COLUMNS = [
      ['open', 'Open'],
      ['blocked', 'Blocked'],
      ['in_progress', 'In Progress'],
      ['done', 'Done']
    ];

    const statusEl = document.getElementById('status');
    const monthSelect = document.getElementById('month-select');
    const heatmapEl = document.getElementById('heatmap');
    const chartEl = document.getElementById('weight-chart');
    const boardEl = document.getElementById('board');

    let heatmapData = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const colorFor = (y) => {
      if (y === null || y === undefined) return STATUS_COLORS.none;
      const label = STATUS_VALUES[y];
      return label ? STATUS_COLORS[label] : STATUS_COLORS.none;
    };

    const renderLegend = () => {
      document.getElementById('legend').innerHTML = STATUS_LABELS
        .map((label) => `<span><span class="swatch" style="background:${STATUS_COLORS[label]}"></span>${label}</span>`)
        .join('');
      document.getElementById('status-value').innerHTML = STATUS_LABELS
        .map((label) => `<option value="${label}">${label}</option>`)
        .join('');
    };

    const renderHeatmap = () => {
      if (!heatmapData) return;
      const bucket = heatmapData.buckets.find((b) => b.bucket === monthSelect.value);
      if (!bucket) {
        heatmapEl.innerHTML = '<p class="subtitle">No records yet.</p>';
        return;
      }

      const header = bucket.dates.map((d) => `<th>${d.slice(8)}</th>`).join('');
      const rows = bucket.series
        .map((series) => {
          const cells = series.data
            .map((point) => `<td style="background:${colorFor(point.y)}" data-activity="${series.name}" data-date="${point.x}" title="${series.name} ${point.x}"></td>`)
            .join('');
          return `<tr><th>${series.name}</th>${cells}</tr>`;
        })
        .join('');
      heatmapEl.innerHTML = `<table><tr><th></th>${header}</tr>${rows}</table>`;
    };

    const loadHeatmap = async () => {
      const res = await fetch('/api/heatmap?granularity=month');
      if (!res.ok) throw new Error('Unable to load heatmap');
      heatmapData = await res.json();
      const selected = monthSelect.value;
      monthSelect.innerHTML = heatmapData.buckets
        .map((b) => `<option value="${b.bucket}">${b.bucket}</option>`)
        .join('');
      if (heatmapData.buckets.some((b) => b.bucket === selected)) {
        monthSelect.value = selected;
      }
      renderHeatmap();
    };

    const renderWeightChart = (seriesSet) => {
      const width = 720;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 20;

      const values = seriesSet.flatMap((s) => s.data.map((p) => p.y)).filter((y) => y !== null);
      if (!values.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      let min = Math.min(...values);
      let max = Math.max(...values);
      if (min === max) {
        min -= 1;
        max += 1;
      }
      const range = max - min;

      const axis = seriesSet[0].data.map((p) => p.x);
      const xStep = axis.length > 1 ? (width - paddingX * 2) / (axis.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - ((value - min) * (height - top - paddingY)) / range;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${value.toFixed(1)}</text>`;
      }

      const colors = ['#008FFB', '#00E396'];
      const paths = seriesSet
        .map((series, idx) => {
          let path = '';
          let pen = false;
          series.data.forEach((point, i) => {
            if (point.y === null) {
              pen = false;
              return;
            }
            path += `${pen ? 'L' : 'M'} ${x(i).toFixed(2)} ${y(point.y).toFixed(2)} `;
            pen = true;
          });
          return `<path class="chart-line" stroke="${colors[idx % colors.length]}" d="${path.trim()}" />`;
        })
        .join('');

      const labelEvery = axis.length > 10 ? Math.ceil(axis.length / 10) : 1;
      const labels = axis
        .map((label, i) => (i % labelEvery === 0
          ? `<text class="chart-label" x="${x(i)}" y="${height - paddingY + 18}" text-anchor="middle">${label.slice(5)}</text>`
          : ''))
        .join('');

      chartEl.innerHTML = `${grid}${paths}${labels}`;
    };

    const loadWeight = async () => {
      const res = await fetch('/api/weight/series?bounds=null');
      if (!res.ok) throw new Error('Unable to load weight series');
      const body = await res.json();
      renderWeightChart(body.series);
    };

    const renderBoard = (tasks) => {
      boardEl.innerHTML = TASK_COLUMNS
        .map(([key, label]) => {
          const cards = tasks
            .filter((t) => t.status === key)
            .map((t) => `<div class="task"><strong>${t.title}</strong><span>${t.message || ''}</span><span class="meta">${t.startDate || '-'} → ${t.endDate || '-'}</span></div>`)
            .join('');
          return `<div class="column"><h3>${label}</h3>${cards || '<span class="meta">No tasks</span>'}</div>`;
        })
        .join('');
    };

    const loadTasks = async () => {
      const res = await fetch('/api/tasks');
      if (!res.ok) throw new Error('Unable to load tasks');
      renderBoard(await res.json());
    };

    const refresh = async () => {
      await Promise.all([loadHeatmap(), loadWeight(), loadTasks()]);
    };

    monthSelect.addEventListener('change', renderHeatmap);

    heatmapEl.addEventListener('click', (event) => {
      const cell = event.target.closest('td');
      if (!cell) return;
      document.getElementById('status-activity').value = cell.dataset.activity;
      document.getElementById('status-date').value = cell.dataset.date;
    });

    document.getElementById('status-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const payload = {
        activity: document.getElementById('status-activity').value,
        date: document.getElementById('status-date').value,
        status: document.getElementById('status-value').value
      };
      fetch('/api/activities/status', {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      })
        .then((res) => {
          if (!res.ok) return res.text().then((msg) => { throw new Error(msg || 'Request failed'); });
          setStatus('Saved', 'ok');
          return loadHeatmap();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('weight-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const payload = {
        date: document.getElementById('weight-date').value,
        weight: parseFloat(document.getElementById('weight-value').value)
      };
      fetch('/api/weight', {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      })
        .then((res) => {
          if (!res.ok) return res.text().then((msg) => { throw new Error(msg || 'Request failed'); });
          setStatus('Saved', 'ok');
          return loadWeight();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    renderLegend();
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
