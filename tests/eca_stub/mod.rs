use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const KENYA_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>ECA Statistics - Country profile</title></head>
  <body>
    <form id="aspnetForm">
      <h3><b></b></h3>
      <h3><b>   </b></h3>
      <h3><b> Kenya </b></h3>
      <h3><b>Selected indicators</b></h3>
      <table id="StatBasebody_tblPopulation">
        <tr><td>Indicator</td><td>2015</td><td>2016</td><td>2017</td></tr>
        <tr><td>Total population (millions)</td><td>47.2</td><td>48.5</td><td>49.7</td></tr>
        <tr><td>Net migration, thousands</td><td>-10</td><td>-10</td><td>-10</td></tr>
      </table>
      <table id="StatBasebody_tblPopulationDS">
        <tr><td>Data source</td></tr>
        <tr><td>UN DESA World Population Prospects</td></tr>
        <tr><td>Kenya National Bureau of Statistics</td></tr>
      </table>
      <table id="StatBasebody_tblHealth">
        <tr><td>Indicator</td><td>2015</td><td>2016</td><td>2017</td></tr>
        <tr><td>Life expectancy at birth</td><td>66.1</td><td>66.7</td><td>67.3</td></tr>
      </table>
      <table id="StatBasebody_tblHealthDS">
        <tr><td>Data source</td></tr>
        <tr><td>WHO</td><td>World Bank WDI</td></tr>
      </table>
      <table id="StatBasebody_tblEducation">
        <tr><td>Indicator</td><td>2015</td><td>2016</td><td>2017</td></tr>
        <tr><td>Primary enrolment, gross (%)</td><td>104.5</td><td>105.1</td><td>103.9</td></tr>
      </table>
      <table id="StatBasebody_tblEducationDS">
        <tr><td>Data source</td></tr>
        <tr><td>UNESCO Institute for Statistics</td></tr>
      </table>
    </form>
  </body>
</html>
"#;

pub const METADATA: &str = "\
population_and_migration:
  title: Population and Migration Indicators
  name: population-and-migration-indicators
  notes: Population indicators.
  data_source: ''
  methodology: Registry
health:
  title: Health Indicators
  name: health-indicators
  notes: Health indicators.
  data_source: ''
education:
  title: Education Indicators
  name: education-indicators
  notes: Education indicators.
  data_source: ''
";

/// Local stand-in for the statistics site serving `/data/BrowseData.aspx?Id=<id>`.
pub struct EcaStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl EcaStub {
    pub fn spawn(pages: HashMap<u32, String>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start eca stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/data");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let page = url
                    .strip_prefix("/data/BrowseData.aspx?Id=")
                    .and_then(|id| id.parse::<u32>().ok())
                    .and_then(|id| pages.get(&id));

                let response = match page {
                    Some(body) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"text/html; charset=utf-8"[..],
                        )
                        .expect("build header");
                        tiny_http::Response::from_string(body.clone()).with_header(header)
                    }
                    None => tiny_http::Response::from_string("not found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn with_page(id: u32, body: &str) -> Self {
        Self::spawn(HashMap::from([(id, body.to_owned())]))
    }
}

impl Drop for EcaStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
