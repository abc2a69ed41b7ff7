use crate::chart::{escape, WEEKDAYS};
use chrono::NaiveDate;

pub fn render_index(name: &str, today: NaiveDate) -> String {
    let name = if name.trim().is_empty() { "Athlete" } else { name };
    let weekdays: String = WEEKDAYS
        .iter()
        .map(|day| format!(r#"<div class="day-of-week">{day}</div>"#))
        .collect();
    INDEX_HTML
        .replace("{{NAME}}", &escape(name))
        .replace("{{TODAY}}", &today.format("%Y-%m-%d").to_string())
        .replace("{{WEEKDAYS}}", &weekdays)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fit Track</title>
  <style>
    :root {
      --bg: #1d2330;
      --card: #262e3f;
      --ink: #f2f4f8;
      --muted: #9aa3b5;
      --accent: #3f76c0;
      --hit: lightgreen;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(1040px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1, h2 {
      margin: 0;
    }

    .widgets {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .visual-widget {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
    }

    .averages {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 12px;
    }

    .averages .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .averages .label {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .toolbar {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    button, select {
      background: var(--accent);
      color: white;
      border: none;
      border-radius: 8px;
      padding: 6px 12px;
      cursor: pointer;
    }

    .chart-frame img {
      width: 100%;
      display: block;
      background: white;
      border-radius: 12px;
    }

    .days-of-week, .days-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .day-of-week {
      text-align: center;
      color: var(--muted);
    }

    .day, .empty-day {
      min-height: 64px;
      border-radius: 10px;
      padding: 8px;
    }

    .day {
      background: var(--card);
    }

    .day.today {
      outline: 2px solid var(--accent);
    }

    .day.has-workout {
      color: var(--hit);
      cursor: pointer;
    }

    #workout-detail {
      min-height: 1.2em;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Welcome back, {{NAME}}</h1>
    </header>

    <section class="toolbar">
      <button type="button" id="prev-week">&lt;</button>
      <h2 id="week-title">Week</h2>
      <button type="button" id="next-week">&gt;</button>
      <select id="metric">
        <option value="calories">Calories</option>
        <option value="volume">Volume</option>
        <option value="duration">Duration</option>
      </select>
    </section>

    <section class="widgets">
      <div class="visual-widget averages">
        <div><div class="value" id="count">0</div><div class="label">Number of Workouts This Week</div></div>
        <div><div class="value" id="avg-calories">0 kcal</div><div class="label">Avg Calories Burned This Week</div></div>
        <div><div class="value" id="avg-volume">0 lbs</div><div class="label">Avg Volume Lifted This Week</div></div>
        <div><div class="value" id="avg-duration">0 min</div><div class="label">Avg Minutes Per Workout This Week</div></div>
      </div>
      <div class="visual-widget chart-frame">
        <img id="chart" alt="Weekly chart" />
      </div>
    </section>

    <section class="visual-widget">
      <div class="toolbar">
        <button type="button" id="prev-month">&lt;</button>
        <h2 id="month-title">Month</h2>
        <button type="button" id="next-month">&gt;</button>
      </div>
      <div class="days-of-week">{{WEEKDAYS}}</div>
      <div class="days-grid" id="days-grid"></div>
      <p id="workout-detail"></p>
    </section>
  </main>

  <script>
    const weekTitle = document.getElementById('week-title');
    const monthTitle = document.getElementById('month-title');
    const grid = document.getElementById('days-grid');
    const detail = document.getElementById('workout-detail');
    const chart = document.getElementById('chart');
    const metric = document.getElementById('metric');

    let weekDate = '{{TODAY}}';
    let neighbours = { previous: null, next: null };
    let month = { year: Number(weekDate.slice(0, 4)), month: Number(weekDate.slice(5, 7)) };

    const loadWeek = async () => {
      const resp = await fetch(`/api/week?date=${weekDate}`);
      if (!resp.ok) {
        console.warn('could not load week', await resp.text());
        return;
      }
      const data = await resp.json();
      neighbours = { previous: data.previousWeek, next: data.nextWeek };
      weekTitle.textContent = `Week of ${data.startLabel} - ${data.endLabel}`;
      document.getElementById('count').textContent = data.summary.count;
      document.getElementById('avg-calories').textContent = `${data.summary.avgCalories} kcal`;
      document.getElementById('avg-volume').textContent = `${data.summary.avgVolume} lbs`;
      document.getElementById('avg-duration').textContent = `${data.summary.avgDurationMinutes} min`;
      chart.src = `/chart/week?date=${weekDate}&metric=${metric.value}`;
    };

    const showWorkout = async (day) => {
      const resp = await fetch(`/api/calendar/${month.year}/${month.month}/${day}`);
      if (!resp.ok) {
        detail.textContent = '';
        return;
      }
      const workout = await resp.json();
      const parts = [
        workout.workoutType,
        workout.durationMinutes != null ? `${workout.durationMinutes} min` : null,
        workout.calories != null ? `${workout.calories} kcal` : null,
        workout.volume != null ? `${workout.volume} lbs` : null,
      ].filter(Boolean);
      detail.textContent = parts.join(' · ');
    };

    const loadMonth = async () => {
      const resp = await fetch(`/api/calendar?year=${month.year}&month=${month.month}`);
      if (!resp.ok) {
        console.warn('could not load calendar', await resp.text());
        return;
      }
      const data = await resp.json();
      monthTitle.textContent = data.label;
      grid.innerHTML = '';
      detail.textContent = '';
      data.cells.forEach((cell) => {
        const el = document.createElement('div');
        if (cell.kind === 'blank') {
          el.className = 'empty-day';
        } else {
          el.className = 'day' + (cell.isToday ? ' today' : '');
          el.textContent = cell.dayNumber;
          const workout = cell.matchedWorkout;
          if (workout) {
            el.classList.add('has-workout');
            if (workout.durationMinutes) {
              el.appendChild(document.createElement('br'));
              el.appendChild(document.createTextNode(`${workout.durationMinutes} min`));
            }
            el.addEventListener('click', () => showWorkout(cell.dayNumber));
          }
        }
        grid.appendChild(el);
      });
    };

    const stepMonth = (delta) => {
      const index = month.year * 12 + (month.month - 1) + delta;
      month = { year: Math.floor(index / 12), month: (index % 12) + 1 };
      loadMonth();
    };

    const stepWeek = (target) => {
      if (!target) return;
      weekDate = target;
      loadWeek();
    };

    document.getElementById('prev-week').addEventListener('click', () => stepWeek(neighbours.previous));
    document.getElementById('next-week').addEventListener('click', () => stepWeek(neighbours.next));
    document.getElementById('prev-month').addEventListener('click', () => stepMonth(-1));
    document.getElementById('next-month').addEventListener('click', () => stepMonth(1));
    metric.addEventListener('change', loadWeek);

    loadWeek();
    loadMonth();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_placeholders() {
        let html = render_index("Jane <Doe>", NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert!(html.contains("Welcome back, Jane &lt;Doe&gt;"));
        assert!(html.contains("let weekDate = '2024-02-15';"));
        assert!(html.contains(r#"<div class="day-of-week">Sun</div>"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn page_reads_camel_case_fields_and_server_week_steps() {
        let html = render_index("Ann", NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        for field in ["startLabel", "avgCalories", "previousWeek", "nextWeek", "dayNumber", "matchedWorkout"] {
            assert!(html.contains(field), "{field}");
        }
        assert!(!html.contains("start_label"));
        assert!(!html.contains("day_number"));
    }

    #[test]
    fn blank_name_gets_a_greeting() {
        let html = render_index("  ", NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert!(html.contains("Welcome back, Athlete"));
    }
}
