//! Inline stylesheet for preview pages

/// Stylesheet embedded in every page's `<style>` element
pub const STYLESHEET: &str = r#"
body {
  margin: 0;
  font-family: "Raleway", sans-serif;
  color: #2b2b2b;
  background: #fafafa;
}
h1, h2, h3 {
  font-family: "Montserrat", sans-serif;
}
a {
  color: #2364aa;
}
.preview-banner {
  padding: 16px 32px;
  background: #fff4d6;
  border-bottom: 1px solid #e8c766;
}
.preview-banner h1 {
  margin: 0 0 4px;
  font-size: 20px;
}
.preview-banner p {
  margin: 0;
}
.spec-header {
  padding: 32px;
  background: #ffffff;
  border-bottom: 1px solid #e0e0e0;
}
.spec-header__description-title {
  margin: 0 0 8px;
}
.spec-header__description-description {
  margin-top: 16px;
  max-width: 960px;
}
.spec-endpoint {
  margin: 24px 32px;
  padding: 24px;
  background: #ffffff;
  border: 1px solid #e0e0e0;
  border-radius: 4px;
}
.spec-endpoint__header-title {
  margin: 0;
}
.method {
  display: inline-block;
  min-width: 64px;
  padding: 2px 8px;
  border-radius: 3px;
  color: #ffffff;
  font-size: 14px;
  text-align: center;
  background: #6b6b6b;
}
.method.get { background: #2f8132; }
.method.post { background: #186faf; }
.method.put { background: #95507c; }
.method.patch { background: #b36b00; }
.method.delete { background: #b52b27; }
.method.head, .method.options, .method.trace { background: #555555; }
.resource-url code {
  display: block;
  padding: 8px 12px;
  background: #f3f3f3;
  border-radius: 3px;
  word-break: break-all;
}
.resource-detail {
  display: flex;
  margin-bottom: 4px;
}
.resource-detail__title {
  width: 120px;
  font-weight: 700;
}
.table-container {
  overflow-x: auto;
}
table {
  width: 100%;
  border-collapse: collapse;
}
th, td {
  padding: 8px;
  text-align: left;
  vertical-align: top;
  border-bottom: 1px solid #e0e0e0;
}
th {
  background: #f3f3f3;
}
.schema-list {
  margin: 0;
  padding-left: 24px;
  list-style: none;
  border-left: 1px dashed #c8c8c8;
}
.schema-list.first {
  padding-left: 0;
  border-left: none;
}
.schema-property {
  margin: 8px 0;
}
.schema-property__description-title {
  display: inline-block;
  font-weight: 700;
}
.schema-property__description-type {
  margin-left: 6px;
  color: #6b6b6b;
}
.schema-property__description-description {
  margin-top: 2px;
}
.required {
  margin-left: 6px;
  color: #b52b27;
  font-size: 12px;
}
.array-bound {
  font-family: monospace;
  font-weight: 700;
}
.codeblock {
  padding: 12px;
  overflow-x: auto;
  background: #f3f3f3;
  border-radius: 3px;
}
.endpoint-error {
  padding: 12px;
  color: #b52b27;
  background: #fdecea;
  border: 1px solid #f5c2c0;
  border-radius: 3px;
}
"#;
