mod crawl;
mod export;
