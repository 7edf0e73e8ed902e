// render/template.rs - 页面内联样式与脚本

pub const STYLE: &str = r#"
    body { font-family: Arial, "PingFang SC", "Microsoft YaHei", sans-serif; margin: 20px; }
    .meta { color: #555; margin-bottom: 12px; }
    .global-search { width: 360px; padding: 8px; margin-bottom: 12px; }
    .table-wrap { overflow-x: auto; border: 1px solid #ddd; }
    table { border-collapse: collapse; min-width: 1800px; width: 100%; }
    th, td { border: 1px solid #ddd; padding: 8px; text-align: left; vertical-align: top; }
    thead th { background: #f5f5f5; position: sticky; top: 0; z-index: 1; }
    th[data-key] { cursor: pointer; user-select: none; }
    th[aria-sort="ascending"]::after { content: " ▲"; }
    th[aria-sort="descending"]::after { content: " ▼"; }
    .filter-row input { width: 100%; box-sizing: border-box; padding: 4px; }
    tbody tr:nth-child(even) { background: #fafafa; }
    tbody tr:hover { background: #eef6ff; }
    .wrap { max-width: 360px; white-space: normal; word-break: break-all; line-height: 1.4; }
"#;

/// 排序、筛选与计数逻辑；规则与 `render::view` 相同
pub const SCRIPT: &str = r#"
(function () {
  const table = document.getElementById('literatureTable');
  const tbody = table.tBodies[0];
  const headers = Array.from(table.querySelectorAll('thead th[data-key]'));
  const filterInputs = Array.from(table.querySelectorAll('input[data-filter]'));
  const globalSearch = document.getElementById('globalSearch');
  const countNode = document.getElementById('count');
  const numberPattern = /^-?[0-9]+(\.[0-9]+)?$/;

  // 原始顺序，用于稳定排序
  const rows = Array.from(tbody.rows).sort((a, b) => Number(a.dataset.index) - Number(b.dataset.index));

  let sortCol = table.dataset.sortCol === '' ? null : Number(table.dataset.sortCol);
  let sortAsc = table.dataset.sortDir !== 'desc';

  function cellText(row, col) {
    const cell = row.cells[col];
    return cell ? cell.textContent : '';
  }

  function compare(a, b, kind) {
    if (kind === 'numeric') {
      const at = a.trim();
      const bt = b.trim();
      if (numberPattern.test(at) && numberPattern.test(bt)) {
        return Number(at) - Number(bt);
      }
    }
    if (a === b) return 0;
    return a < b ? -1 : 1;
  }

  function applyView() {
    const needle = globalSearch.value.trim().toLowerCase();
    const filters = filterInputs
      .map(input => [Number(input.dataset.col), input.value.trim().toLowerCase()])
      .filter(([, text]) => text !== '');

    const ordered = rows.slice();
    if (sortCol !== null) {
      const kind = headers[sortCol].dataset.sort;
      const direction = sortAsc ? 1 : -1;
      ordered.sort((a, b) => compare(cellText(a, sortCol), cellText(b, sortCol), kind) * direction);
    }

    let visible = 0;
    for (const row of ordered) {
      const texts = Array.from(row.cells, cell => cell.textContent.toLowerCase());
      const passGlobal = !needle || texts.some(text => text.includes(needle));
      const passColumns = filters.every(([col, text]) => (texts[col] || '').includes(text));
      row.hidden = !(passGlobal && passColumns);
      if (!row.hidden) visible += 1;
      tbody.appendChild(row);
    }
    countNode.textContent = String(visible);

    headers.forEach((th, i) => {
      const state = i === sortCol ? (sortAsc ? 'ascending' : 'descending') : 'none';
      th.setAttribute('aria-sort', state);
    });
  }

  headers.forEach((th, i) => {
    th.addEventListener('click', () => {
      if (sortCol === i) {
        sortAsc = !sortAsc;
      } else {
        sortCol = i;
        sortAsc = true;
      }
      applyView();
    });
  });

  globalSearch.addEventListener('input', applyView);
  filterInputs.forEach(input => input.addEventListener('input', applyView));

  applyView();
})();
"#;
